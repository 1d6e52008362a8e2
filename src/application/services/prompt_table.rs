use crate::domain::AnalysisTier;

/// Instruction set and token budget for one tier. The `{text}` placeholder in
/// the user template is replaced with the extracted document text.
#[derive(Debug, Clone, Copy)]
pub struct PromptTemplate {
    pub system_instruction: &'static str,
    pub user_instruction_template: &'static str,
    pub multimodal_instruction: &'static str,
    pub max_output_tokens: u32,
}

/// Process-wide tier → template mapping, read-only after startup.
#[derive(Debug, Clone, Copy)]
pub struct PromptTable {
    preview: PromptTemplate,
    full: PromptTemplate,
    chat_followup: PromptTemplate,
}

pub const PREVIEW_MAX_OUTPUT_TOKENS: u32 = 600;
pub const FULL_MAX_OUTPUT_TOKENS: u32 = 4096;
pub const CHAT_MAX_OUTPUT_TOKENS: u32 = 2048;

const EXPLAINER_SYSTEM: &str = "Ești un asistent care explică documente oficiale românești \
(notificări fiscale, amenzi, decizii administrative, adeverințe, scrisori de la angajator) \
pe înțelesul oricui. Răspunzi întotdeauna în limba română, simplu, fără jargon juridic.";

const PREVIEW_USER_TEMPLATE: &str = "Analizează acest document oficial și oferă o scurtă \
previzualizare, strict cu secțiunile:\n\
- Tip document\n\
- Urgență (ridicată / medie / scăzută)\n\
- Rezumat (1-2 propoziții)\n\
- Termen limită (dacă există)\n\n\
Nu include pașii de urmat, nici consecințele complete. Maximum 150 de cuvinte.\n\n\
Document:\n\n{text}";

const PREVIEW_MULTIMODAL: &str = "Analizează acest document oficial (imagine sau PDF atașat) \
și oferă o scurtă previzualizare, strict cu secțiunile:\n\
- Tip document\n\
- Urgență (ridicată / medie / scăzută)\n\
- Rezumat (1-2 propoziții)\n\
- Termen limită (dacă există)\n\n\
Nu include pașii de urmat, nici consecințele complete. Maximum 150 de cuvinte.";

const FULL_USER_TEMPLATE: &str = "Analizează acest document oficial și oferă o explicație \
completă, cu secțiunile:\n\
- Ce este documentul\n\
- De ce l-ați primit\n\
- Ce trebuie să faceți\n\
- Termen limită\n\
- Consecințe dacă nu acționați\n\
- Cum puteți contesta\n\
- Sfaturi practice\n\
- Unde puteți cere ajutor\n\n\
Document:\n\n{text}";

const FULL_MULTIMODAL: &str = "Analizează acest document oficial (imagine sau PDF atașat) și \
oferă o explicație completă, cu secțiunile:\n\
- Ce este documentul\n\
- De ce l-ați primit\n\
- Ce trebuie să faceți\n\
- Termen limită\n\
- Consecințe dacă nu acționați\n\
- Cum puteți contesta\n\
- Sfaturi practice\n\
- Unde puteți cere ajutor";

const CHAT_SYSTEM: &str = "Ești un asistent care răspunde la întrebări de continuare despre \
documente oficiale românești deja analizate. Răspunzi concis, în limba română, pe înțelesul \
oricui.";

static PROMPTS: PromptTable = PromptTable {
    preview: PromptTemplate {
        system_instruction: EXPLAINER_SYSTEM,
        user_instruction_template: PREVIEW_USER_TEMPLATE,
        multimodal_instruction: PREVIEW_MULTIMODAL,
        max_output_tokens: PREVIEW_MAX_OUTPUT_TOKENS,
    },
    full: PromptTemplate {
        system_instruction: EXPLAINER_SYSTEM,
        user_instruction_template: FULL_USER_TEMPLATE,
        multimodal_instruction: FULL_MULTIMODAL,
        max_output_tokens: FULL_MAX_OUTPUT_TOKENS,
    },
    chat_followup: PromptTemplate {
        system_instruction: CHAT_SYSTEM,
        user_instruction_template: "{text}",
        multimodal_instruction: "",
        max_output_tokens: CHAT_MAX_OUTPUT_TOKENS,
    },
};

impl PromptTable {
    pub fn builtin() -> &'static Self {
        &PROMPTS
    }

    pub fn template(&self, tier: AnalysisTier) -> &PromptTemplate {
        match tier {
            AnalysisTier::Preview => &self.preview,
            AnalysisTier::Full => &self.full,
            AnalysisTier::ChatFollowup => &self.chat_followup,
        }
    }
}
