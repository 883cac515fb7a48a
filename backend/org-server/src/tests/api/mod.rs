mod error;
mod input;
