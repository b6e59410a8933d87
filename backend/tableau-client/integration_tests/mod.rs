mod client;
mod errors;
mod helpers;
mod publish;
