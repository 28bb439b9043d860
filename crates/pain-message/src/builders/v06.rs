//! `pain.001.001.06`

use super::MessageBuilder;
use super::common::{self, AgentTag, BlockLayout, ExecutionDate};
use crate::Result;
use crate::context::BuildContext;
use pain_ir::{Element, Record};
use pain_schema::MessageVariant;

const LAYOUT: BlockLayout = BlockLayout {
    agent: AgentTag::Bicfi,
    execution_date: ExecutionDate::Date,
    block_totals: true,
    service_level: true,
    instruction_id: false,
    debtor_currency: false,
    ultimate_debtor: true,
    supplementary_data: false,
};

/// As `.05`, plus the ultimate debtor of each payment block
#[derive(Debug, Default, Clone, Copy)]
pub struct Pain001V06;

impl MessageBuilder for Pain001V06 {
    fn variant(&self) -> MessageVariant {
        MessageVariant::V06
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
