//! Stage 7 (Render): apply the per-agent template via the pluggable
//! [`IPackRenderer`] port. A missing or failing renderer is not an
//! error — the already-assembled `ContextPackContent` is the fallback
//! rendering (plain sections, no per-agent transformation).

use ircore_core::context_pack::ContextPackContent;
use ircore_core::traits::IPackRenderer;
use tracing::warn;

/// Returns the rendered agent-specific block (replacing the plain one
/// assembling.rs produced) plus any warning from a failed render.
pub fn render(renderer: Option<&dyn IPackRenderer>, template_id: &str, content: &mut ContextPackContent) -> Option<String> {
    let renderer = renderer?;
    match renderer.render(template_id, content) {
        Ok(rendered) => {
            content.agent_specific = rendered;
            None
        }
        Err(err) => {
            warn!(template_id, error = %err, "render stage failed, keeping unrendered content");
            Some(format!("render failed for template {template_id}: {err}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ircore_core::errors::{IrError, IrResult};

    struct UppercaseRenderer;
    impl IPackRenderer for UppercaseRenderer {
        fn render(&self, _template_id: &str, content: &ContextPackContent) -> IrResult<String> {
            Ok(content.agent_specific.to_uppercase())
        }
    }

    struct FailingRenderer;
    impl IPackRenderer for FailingRenderer {
        fn render(&self, template_id: &str, _content: &ContextPackContent) -> IrResult<String> {
            Err(IrError::TemplateRender { template_id: template_id.to_string(), reason: "boom".to_string() })
        }
    }

    #[test]
    fn no_renderer_leaves_content_untouched() {
        let mut content = ContextPackContent { agent_specific: "abc".to_string(), ..Default::default() };
        let warning = render(None, "default", &mut content);
        assert!(warning.is_none());
        assert_eq!(content.agent_specific, "abc");
    }

    #[test]
    fn renderer_replaces_agent_specific_block() {
        let mut content = ContextPackContent { agent_specific: "abc".to_string(), ..Default::default() };
        let warning = render(Some(&UppercaseRenderer), "default", &mut content);
        assert!(warning.is_none());
        assert_eq!(content.agent_specific, "ABC");
    }

    #[test]
    fn failing_renderer_is_not_fatal() {
        let mut content = ContextPackContent { agent_specific: "abc".to_string(), ..Default::default() };
        let warning = render(Some(&FailingRenderer), "default", &mut content);
        assert!(warning.is_some());
        assert_eq!(content.agent_specific, "abc");
    }
}
