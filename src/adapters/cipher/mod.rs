pub mod aes_gcm_cipher;
