#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod dto;
pub mod file;
pub mod memory;

#[cfg(test)]
mod tests {
    pub mod data;
}
