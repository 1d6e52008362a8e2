mod interpretation_service;
mod prompt_table;
mod quality_gate;
mod request_assembler;
mod validation;

pub use interpretation_service::{Interpretation, InterpretationError, InterpretationService};
pub use prompt_table::{
    CHAT_MAX_OUTPUT_TOKENS, FULL_MAX_OUTPUT_TOKENS, PREVIEW_MAX_OUTPUT_TOKENS, PromptTable,
    PromptTemplate,
};
pub use quality_gate::QualityGate;
pub use request_assembler::{AssemblyError, RequestAssembler};
pub use validation::ValidationError;
