//! Root creation and builder dispatch

use crate::builders::BuilderRegistry;
use crate::context::BuildContext;
use crate::root::create_root;
use crate::{Error, Result};
use pain_ir::{Cursor, Document, DocumentMetadata, Record};
use tracing::debug;

/// Build the complete document for `ctx.variant` from validated records.
///
/// The returned metadata records the variant, the number of transaction
/// leaves, the group header control sum and the generation time.
///
/// # Errors
///
/// Fails when no builder is registered for the variant, when `records` is
/// empty, or when the builder fails.
pub fn build_document(
    registry: &BuilderRegistry,
    ctx: &BuildContext,
    records: &[Record],
) -> Result<Document> {
    if records.is_empty() {
        return Err(Error::NoRecords);
    }
    let builder = registry.get(ctx.variant)?;

    let mut root = create_root(&ctx.binding, ctx.variant);
    let body = builder.build(ctx, records)?;

    let transaction_count = body.count_descendants("CdtTrfTxInf");
    let control_sum = Cursor::new(&body)
        .navigate("GrpHdr/CtrlSum")
        .and_then(|c| c.text().map(str::to_string))
        .ok();
    debug!(
        "Built {} with {} transaction(s) from {} record(s)",
        ctx.variant,
        transaction_count,
        records.len()
    );

    root.append(body);
    let metadata = DocumentMetadata {
        variant: Some(ctx.variant.as_str().to_string()),
        transaction_count,
        control_sum,
        created_at: Some(ctx.created_at),
    };
    Ok(Document::with_metadata(root, metadata))
}
