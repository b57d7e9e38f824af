//! Pasos concretos, declarados con el macro `work_step!` del core.

pub mod collect;
pub mod echo;
pub mod fetch;
pub mod select;
pub mod train;
