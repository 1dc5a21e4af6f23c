use sitenav_types::WebsiteRecord;

/// Rebuild the display order from a list of names.
///
/// Each name in `order` claims the first not-yet-claimed record carrying
/// that name; unknown names are ignored. Records no name claimed follow in
/// their original relative order, so nothing is ever dropped or duplicated.
pub fn reorder_records(websites: Vec<WebsiteRecord>, order: &[String]) -> Vec<WebsiteRecord> {
    let mut slots: Vec<Option<WebsiteRecord>> = websites.into_iter().map(Some).collect();
    let mut reordered = Vec::with_capacity(slots.len());

    for name in order {
        let claimed = slots
            .iter_mut()
            .find(|slot| slot.as_ref().is_some_and(|w| &w.name == name))
            .and_then(Option::take);
        if let Some(record) = claimed {
            reordered.push(record);
        }
    }

    reordered.extend(slots.into_iter().flatten());
    reordered
}
