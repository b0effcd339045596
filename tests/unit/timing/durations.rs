use super::*;

#[test]
fn even_split_has_no_remainder() {
    let plan = allocate_durations(3000, 20).unwrap();
    assert_eq!(plan.as_slice(), &[150; 20]);

    let plan = allocate_durations(3000, 40).unwrap();
    assert_eq!(plan.as_slice(), &[75; 40]);

    let plan = allocate_durations(3000, 6).unwrap();
    assert_eq!(plan.as_slice(), &[500; 6]);

    let plan = allocate_durations(3000, 2).unwrap();
    assert_eq!(plan.as_slice(), &[1500, 1500]);
}

#[test]
fn remainder_goes_to_last_frame() {
    let plan = allocate_durations(1000, 3).unwrap();
    assert_eq!(plan.as_slice(), &[333, 333, 334]);

    let plan = allocate_durations(3000, 7).unwrap();
    assert_eq!(&plan.as_slice()[..6], &[428; 6]);
    assert_eq!(plan.as_slice()[6], 432);
}

#[test]
fn sum_is_conserved_for_many_inputs() {
    for total in [0u32, 1, 2, 59, 999, 3000, 3001, 65_535, 1_000_003] {
        for count in 2..=64usize {
            let plan = allocate_durations(total, count).unwrap();
            assert_eq!(plan.len(), count);
            assert_eq!(plan.total_ms(), u64::from(total), "{total}/{count}");
        }
    }
}

#[test]
fn fewer_than_two_frames_is_rejected() {
    assert!(matches!(
        allocate_durations(3000, 1),
        Err(StampError::Validation(_))
    ));
    assert!(allocate_durations(3000, 0).is_err());
}

#[test]
fn zero_total_gives_zero_durations() {
    let plan = allocate_durations(0, 4).unwrap();
    assert_eq!(plan.into_vec(), vec![0, 0, 0, 0]);
}
