//! Внешний API покерного зала.
//!
//! Здесь описываются:
//! - команды (commands.rs) – JSON-сообщения клиента с полем `action`;
//! - DTO (dto.rs) – форма ответов;
//! - ошибки (errors.rs) – то, что видит клиент;
//! - диспетчер (handler.rs) – разбор команды и вызов `TableManager`.

pub mod commands;
pub mod dto;
pub mod errors;
pub mod handler;

pub use commands::*;
pub use dto::*;
pub use errors::*;
pub use handler::{handle_command, handle_json, parse_command};
