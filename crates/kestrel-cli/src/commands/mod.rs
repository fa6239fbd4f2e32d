pub mod check;
pub mod dump;
pub mod interface_loader;
