pub mod token_crypto;
