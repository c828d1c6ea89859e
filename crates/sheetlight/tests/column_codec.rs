use sheetlight::ErrorKind;
use sheetlight::column::{to_letters, to_number};

#[test]
fn letters_and_numbers_are_inverse() -> Result<(), Box<dyn std::error::Error>> {
    for n in 1..=20_000usize {
        let letters = to_letters(n).ok_or("every positive number has a name")?;
        assert!(letters.bytes().all(|b| b.is_ascii_uppercase()), "{letters}");
        assert_eq!(to_number(&letters)?, n);
    }
    Ok(())
}

#[test]
fn zero_has_no_name() {
    assert_eq!(to_letters(0), None);
}

#[test]
fn lowercase_is_accepted() -> Result<(), Box<dyn std::error::Error>> {
    assert_eq!(to_number("aa")?, 27);
    assert_eq!(to_number("xFd")?, 16_384);
    Ok(())
}

#[test]
fn non_letters_are_rejected() {
    for bad in ["", "A1", "Ä", "a-b", " A"] {
        let err = to_number(bad).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidBase26Letters, "{bad:?}");
    }
}

#[test]
fn overflow_is_rejected() {
    let err = to_number(&"Z".repeat(40)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidBase26Letters);
}
