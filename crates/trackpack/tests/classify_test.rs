use trackpack::{Error, FeatureId, LayoutOptions, RawFeature, Strand, Subtype, classify};

fn raw(id: u64, subtype: Subtype, range: Option<(u64, u64)>) -> RawFeature {
    RawFeature {
        id: FeatureId(id),
        subtype,
        strand: Strand::Unknown,
        parent: None,
        mapped_range: range,
    }
}

#[test]
fn classify_rejects_linking_combined_with_type_separation() {
    let options = LayoutOptions {
        separate_types: true,
        link_genes: true,
        ..Default::default()
    };
    assert_eq!(classify(&[], &options), Err(Error::ConflictingModes));
}

#[test]
fn classify_without_separation_yields_a_single_bucket() {
    let features = vec![
        raw(1, Subtype::Gene, Some((0, 100))),
        raw(2, Subtype::Sts, Some((200, 300))),
        raw(3, Subtype::Snp, Some((400, 401))),
    ];
    let options = LayoutOptions {
        track_order: 7,
        ..Default::default()
    };
    let buckets = classify(&features, &options).unwrap();
    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets[0].label, "Features");
    assert_eq!(buckets[0].display_order, 7);
    assert_eq!(buckets[0].len(), 3);
}

#[test]
fn classify_separates_subtypes_in_first_seen_order() {
    let features = vec![
        raw(1, Subtype::Sts, Some((0, 10))),
        raw(2, Subtype::Gene, Some((20, 30))),
        raw(3, Subtype::Sts, Some((40, 50))),
        raw(4, Subtype::Snp, Some((60, 61))),
    ];
    let options = LayoutOptions {
        separate_types: true,
        track_order: 10,
        ..Default::default()
    };
    let buckets = classify(&features, &options).unwrap();
    let labels: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["STS markers", "Genes", "SNPs"]);
    let orders: Vec<i32> = buckets.iter().map(|b| b.display_order).collect();
    assert_eq!(orders, vec![10, 11, 12]);
    assert_eq!(buckets[0].len(), 2);
}

#[test]
fn classify_drops_unmapped_features_silently() {
    let features = vec![
        raw(1, Subtype::Sts, Some((0, 10))),
        raw(2, Subtype::Sts, None),
        raw(3, Subtype::Sts, Some((500, 500))),
        raw(4, Subtype::Sts, Some((20, 30))),
    ];
    let buckets = classify(&features, &LayoutOptions::default()).unwrap();
    assert_eq!(buckets.len(), 1);
    let ids: Vec<u64> = buckets[0].records.iter().map(|r| r.id.0).collect();
    assert_eq!(ids, vec![1, 4]);
}

#[test]
fn classify_preserves_input_order_within_a_bucket() {
    let features: Vec<RawFeature> = (0..20)
        .map(|i| raw(i, Subtype::Sts, Some((i * 100, i * 100 + 10))))
        .collect();
    let buckets = classify(&features, &LayoutOptions::default()).unwrap();
    let ids: Vec<u64> = buckets[0].records.iter().map(|r| r.id.0).collect();
    assert_eq!(ids, (0..20).collect::<Vec<u64>>());
}

#[test]
fn classify_normalizes_swapped_mapped_coordinates() {
    let features = vec![raw(1, Subtype::Sts, Some((300, 200)))];
    let buckets = classify(&features, &LayoutOptions::default()).unwrap();
    assert_eq!(buckets[0].records[0].span.from, 200);
    assert_eq!(buckets[0].records[0].span.to, 300);
}
