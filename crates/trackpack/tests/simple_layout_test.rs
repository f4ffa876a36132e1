use trackpack::range::Span;
use trackpack::{ABUT_MARGIN, FeatureId, FeatureRecord, Strand, Subtype, simple_layout};

fn rec(id: u64, from: u64, to: u64) -> FeatureRecord {
    FeatureRecord {
        id: FeatureId(id),
        span: Span::new(from, to),
        subtype: Subtype::Sts,
        strand: Strand::Unknown,
        parent: None,
    }
}

/// Asserts the no-overlap invariant: on every layer, all pairs of placed
/// spans stay disjoint even after the abutment margin.
fn assert_no_overlap(records: &[FeatureRecord], layers: &[Vec<usize>]) {
    for (layer, members) in layers.iter().enumerate() {
        for (i, &a) in members.iter().enumerate() {
            for &b in &members[i + 1..] {
                let pa = records[a].span.pad(ABUT_MARGIN);
                assert!(
                    !pa.intersects(&records[b].span),
                    "records {a} and {b} overlap on layer {layer}"
                );
            }
        }
    }
}

#[test]
fn simple_layout_places_disjoint_features_on_one_layer() {
    let records = vec![rec(1, 0, 100), rec(2, 200, 300), rec(3, 400, 500)];
    let placement = simple_layout(&records);
    assert_eq!(placement.layer_count(), 1);
    assert_eq!(placement.layers[0].len(), 3);
    assert_no_overlap(&records, &placement.layers);
}

#[test]
fn simple_layout_opens_a_new_layer_for_an_overlap() {
    let records = vec![rec(1, 0, 100), rec(2, 50, 150)];
    let placement = simple_layout(&records);
    assert_eq!(placement.layer_count(), 2);
    assert_no_overlap(&records, &placement.layers);
}

#[test]
fn simple_layout_processes_longest_first() {
    // The long record overlaps both short ones; processed longest-first it
    // claims layer 0 and pushes both short records to layer 1.
    let records = vec![rec(1, 0, 10), rec(2, 0, 1000), rec(3, 500, 510)];
    let placement = simple_layout(&records);
    assert_eq!(placement.layers[0], vec![1]);
    assert_eq!(placement.layers[1], vec![0, 2]);
}

#[test]
fn simple_layout_separates_abutting_features() {
    // [0,10) and [10,20) abut; the ±1 margin forces them onto two layers.
    let records = vec![rec(1, 0, 10), rec(2, 10, 20)];
    let placement = simple_layout(&records);
    assert_eq!(placement.layer_count(), 2);
}

#[test]
fn simple_layout_allows_a_two_unit_gap_on_one_layer() {
    let records = vec![rec(1, 0, 10), rec(2, 12, 20)];
    let placement = simple_layout(&records);
    assert_eq!(placement.layer_count(), 1);
}

#[test]
fn simple_layout_breaks_length_ties_by_bucket_order() {
    // Three equal-length mutually overlapping records: layers are assigned in
    // bucket order because the descending-length sort is stable.
    let records = vec![rec(7, 0, 100), rec(8, 0, 100), rec(9, 0, 100)];
    let placement = simple_layout(&records);
    assert_eq!(placement.layers[0], vec![0]);
    assert_eq!(placement.layers[1], vec![1]);
    assert_eq!(placement.layers[2], vec![2]);
}

#[test]
fn simple_layout_is_deterministic() {
    let records: Vec<FeatureRecord> = (0..200)
        .map(|i| rec(i, (i * 37) % 1000, (i * 37) % 1000 + 30 + (i % 5) * 10))
        .collect();
    let a = simple_layout(&records);
    let b = simple_layout(&records);
    assert_eq!(a.layers, b.layers);
    assert_no_overlap(&records, &a.layers);
}

#[test]
fn simple_layout_reuses_layers_first_fit() {
    // After the overlap forces a second layer, a later short record that fits
    // on layer 0 goes there, not onto the most recently opened layer.
    let records = vec![rec(1, 0, 500), rec(2, 100, 200), rec(3, 600, 650)];
    let placement = simple_layout(&records);
    assert_eq!(placement.layers[0], vec![0, 2]);
    assert_eq!(placement.layers[1], vec![1]);
}
