use super::*;

#[test]
fn sizes_pick_a_readable_unit() {
    assert_eq!(format_size(512), "512 B");
    assert_eq!(format_size(300 * 1024), "300 KB");
    assert_eq!(format_size(3 * 1024 * 1024 / 2), "1.5 MB");
}
