use std::collections::HashMap;

use super::resolver::{CoordinateResolver, ResolvedMention};
use super::types::{HighlightGroup, MemberOrder, PixelBox};
use crate::pipeline::fields::{ExtractedFields, FieldCategory};

/// Resolve and group every category, in fixed category order.
/// Categories with nothing resolved contribute no groups.
pub fn build_groups(
    fields: &ExtractedFields,
    resolver: &CoordinateResolver<'_>,
    order: MemberOrder,
) -> Vec<HighlightGroup> {
    let mut groups = Vec::new();
    for category in FieldCategory::ALL {
        let mentions = fields.mentions(category);
        let resolved = resolver.resolve_all(mentions);

        tracing::debug!(
            category = category.key(),
            mentions = mentions.len(),
            resolved = resolved.len(),
            "Resolved category mentions"
        );

        groups.extend(group_category(category, resolved, order));
    }
    groups
}

/// Partition one category's resolved mentions by group id.
///
/// Groups keep first-seen order; members keep response order unless
/// `MemberOrder::ReadingOrder` is requested.
pub fn group_category(
    category: FieldCategory,
    resolved: Vec<ResolvedMention<'_>>,
    order: MemberOrder,
) -> Vec<HighlightGroup> {
    let mut partitions: Vec<(i64, Vec<ResolvedMention<'_>>)> = Vec::new();
    let mut index: HashMap<i64, usize> = HashMap::new();

    for item in resolved {
        let group_id = item.mention.group_id;
        match index.get(&group_id) {
            Some(&i) => partitions[i].1.push(item),
            None => {
                index.insert(group_id, partitions.len());
                partitions.push((group_id, vec![item]));
            }
        }
    }

    partitions
        .into_iter()
        .filter_map(|(group_id, mut members)| {
            if order == MemberOrder::ReadingOrder {
                sort_reading_order(&mut members);
            }
            let bbox = PixelBox::union_of(members.iter().map(|m| m.word))?;
            Some(HighlightGroup {
                category,
                group_id,
                words: members.iter().map(|m| m.mention.word.clone()).collect(),
                bbox,
            })
        })
        .collect()
}

/// Stable sort by top-left y, then x.
fn sort_reading_order(members: &mut [ResolvedMention<'_>]) {
    members.sort_by(|a, b| {
        let (ax, ay) = a.word.top_left();
        let (bx, by) = b.word.top_left();
        ay.total_cmp(&by).then(ax.total_cmp(&bx))
    });
}
