//! `pain.001.001.07`

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

/// `(column, tag)` pairs of the initiating party's postal address
const POSTAL_ADDRESS: [(&str, &str); 5] = [
    ("initiator_street_name", "StrtNm"),
    ("initiator_building_number", "BldgNb"),
    ("initiator_postal_code", "PstCd"),
    ("initiator_town_name", "TwnNm"),
    ("initiator_country_code", "Ctry"),
];

/// Grouped blocks with a structured postal address for the initiating party
#[derive(Debug, Default, Clone, Copy)]
pub struct Pain001V07;

impl MessageBuilder for Pain001V07 {
    fn variant(&self) -> MessageVariant {
        MessageVariant::V07
    }

    fn build(&self, ctx: &BuildContext, records: &[Record]) -> Result<Element> {
        let first = common::first(records)?;

        let mut address = Element::new("PstlAdr");
        for (column, tag) in POSTAL_ADDRESS {
            address.append_leaf(tag, ctx.field(first, column)?);
        }
        let initiating_party =
            common::party(ctx, "InitgPty", first, "initiator_name")?.with_child(address);

        let created = common::creation_time(ctx, first)?;
        let header = common::group_header(ctx, records, created, initiating_party)?;

        let blocks = common::by_payment_information(ctx, records)?;
        common::initiation(ctx, header, &blocks, &LAYOUT)
    }
}
