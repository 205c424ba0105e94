//! 파이프라인 협력자 추상화와 도메인 모델.

mod market_update;
mod providers;

pub use market_update::*;
pub use providers::*;
