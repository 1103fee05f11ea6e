use super::fingerprint::fingerprint;
use super::patterns;
use crate::error::SkipReason;
use crate::registry::{Category, ComponentRecord, Provenance};

/// Derives a component record from one source artifact.
pub(super) fn analyze_component(
    content: &str,
    source_path: &str,
    category: Category,
) -> Result<ComponentRecord, SkipReason> {
    let class_name = patterns::component_class(content).ok_or(SkipReason::NotAComponent)?;

    let mut record = ComponentRecord::new(&class_name, category)
        .with_display_name(&patterns::display_name(content, &class_name))
        .with_description(&patterns::description(content, &class_name))
        .with_use_cases(patterns::use_cases(content, category))
        .with_provenance(Provenance {
            source_path: source_path.to_string(),
            fingerprint: fingerprint(content.as_bytes()),
            dependencies: patterns::dependencies(content),
        });
    for slot in patterns::inputs(content) {
        record.push_input(slot);
    }
    record.outputs = patterns::outputs(content);
    Ok(record)
}
