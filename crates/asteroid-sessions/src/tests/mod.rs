mod helpers;
mod resolve;
