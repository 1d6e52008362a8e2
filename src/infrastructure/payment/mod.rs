mod allow_all_verifier;

pub use allow_all_verifier::AllowAllVerifier;
