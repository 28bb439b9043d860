//! `pain.001.001.04`

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
    ultimate_debtor: false,
    supplementary_data: false,
};

/// One `PmtInf` per record with per-block totals
#[derive(Debug, Default, Clone, Copy)]
pub struct Pain001V04;

impl MessageBuilder for Pain001V04 {
    fn variant(&self) -> MessageVariant {
        MessageVariant::V04
    }

    fn build(&self, ctx: &BuildContext, records: &[Record]) -> Result<Element> {
        let first = common::first(records)?;
        let initiating_party = common::party(ctx, "InitgPty", first, "initiator_name")?;
        let created = common::creation_time(ctx, first)?;
        let header = common::group_header(ctx, records, created, initiating_party)?;

        common::initiation(ctx, header, &common::per_record(records), &LAYOUT)
    }
}
