//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ```text
//! handler.rs          # 親モジュール（re-export）
//! └── handler/
//!     ├── health.rs   # GET /health
//!     └── notify.rs   # POST /notify
//! ```

pub mod health;
pub mod notify;

pub use health::health_check;
pub use notify::{AcceptedResponse, NotifyState, notify};
