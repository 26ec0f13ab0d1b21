use crate::context_pack::ContextPackContent;
use crate::errors::IrResult;

/// Template-rendering port used by the assembler's final stage. Kept as a
/// trait so the default template set can be swapped per agent type
/// without the assembler depending on a specific template engine.
pub trait IPackRenderer: Send + Sync {
    fn render(&self, template_id: &str, content: &ContextPackContent) -> IrResult<String>;
}
