pub mod http_verifier;
