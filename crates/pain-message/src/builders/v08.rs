//! `pain.001.001.08`

use super::MessageBuilder;
use super::common::{self, AgentTag, BlockLayout, ExecutionDate};
use crate::Result;
use crate::context::BuildContext;
use pain_ir::{Element, Record};
use pain_schema::MessageVariant;

const LAYOUT: BlockLayout = BlockLayout {
    agent: AgentTag::Bicfi,
    execution_date: ExecutionDate::DateChoice,
    block_totals: true,
    service_level: true,
    instruction_id: false,
    debtor_currency: false,
    ultimate_debtor: false,
    supplementary_data: false,
};

/// Grouped blocks; the execution date becomes the `Dt` arm of a date choice
#[derive(Debug, Default, Clone, Copy)]
pub struct Pain001V08;

impl MessageBuilder for Pain001V08 {
    fn variant(&self) -> MessageVariant {
        MessageVariant::V08
    }

    fn build(&self, ctx: &BuildContext, records: &[Record]) -> Result<Element> {
        let first = common::first(records)?;
        let initiating_party = common::party(ctx, "InitgPty", first, "initiator_name")?;
        let created = common::creation_time(ctx, first)?;
        let mut header = common::group_header(ctx, records, created, initiating_party)?;
        header.append(common::forwarding_agent(ctx, first)?);

        let blocks = common::by_payment_information(ctx, records)?;
        common::initiation(ctx, header, &blocks, &LAYOUT)
    }
}
