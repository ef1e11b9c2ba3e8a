use super::*;

#[test]
fn validity_icons() {
    assert_eq!(validity_icon(Validity::Valid), "✓");
    assert_eq!(validity_icon(Validity::Invalid), "✕");
    assert_eq!(validity_icon(Validity::Empty), "");
}

#[test]
fn fill_style_clamps_fraction() {
    assert_eq!(fill_style(0.5), "width: 50.0%");
    assert_eq!(fill_style(1.7), "width: 100.0%");
    assert_eq!(fill_style(-0.2), "width: 0.0%");
}

#[test]
fn summary_text_formats_average() {
    let stats = GradingStats { filled: 2, criteria: 3, total: 11.0, average: 5.5, fill_ratio: 2.0 / 3.0 };
    assert_eq!(summary_text(&stats), "2/3 scored · average 5.50");
}

#[test]
fn arrow_keys_map_to_steps() {
    assert_eq!(arrow_step("ArrowUp"), Some(StepDir::Up));
    assert_eq!(arrow_step("ArrowDown"), Some(StepDir::Down));
    assert_eq!(arrow_step("Enter"), None);
}
