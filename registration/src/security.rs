pub mod base64url;
