//! Generation core of a creative-writing application: validated requests
//! (mood, type, genre, length, free text) are compiled into an instruction
//! prompt, dispatched to a generative-model API through a rotating credential
//! pool, post-processed into display markup, and recorded into a
//! history/collection store.

pub mod config;
pub mod generator;
pub mod keys;
pub mod options;
pub mod post;
pub mod prompts;
pub mod providers;
pub mod request;
pub mod store;
