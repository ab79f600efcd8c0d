pub mod chat_controllers;
