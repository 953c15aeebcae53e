pub mod enable;
