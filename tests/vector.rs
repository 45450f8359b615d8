use interposer::vector::{BitVector, Error};

#[test]
fn round_trips_unsigned_values() {
    for n in [0u128, 1, 2, 6, 55, 48, 136, 0xDEAD_BEEF, u128::MAX] {
        assert_eq!(BitVector::from_unsigned(n).value().unwrap(), n);
    }
}

#[test]
fn encodes_minimal_width() {
    assert_eq!(BitVector::from_unsigned(6).binary_string(), "110");
    assert_eq!(BitVector::from_unsigned(1).binary_string(), "1");

    let zero = BitVector::from_unsigned(0);
    assert_eq!(zero.len(), 1);
    assert_eq!(zero.binary_string(), "0");
}

#[test]
fn rejects_non_binary_bits() {
    assert_eq!(
        BitVector::from_bits(&[0, 1, 2], true).unwrap_err(),
        Error::InvalidBitValue(2)
    );

    let mut vector = BitVector::new();
    assert_eq!(vector.append(7).unwrap_err(), Error::InvalidBitValue(7));
    assert!(vector.is_empty());
}

#[test]
fn downto_indexing_addresses_the_first_appended_bit() {
    // Appended as 1, 0, 1, 1: the highest index names the first bit.
    let vector = BitVector::from_bits(&[1, 0, 1, 1], true).unwrap();

    assert_eq!(vector.bit(3).unwrap(), 1);
    assert_eq!(vector.bit(2).unwrap(), 0);
    assert_eq!(vector.bit(1).unwrap(), 1);
    assert_eq!(vector.bit(0).unwrap(), 1);
}

#[test]
fn to_indexing_addresses_storage_positions() {
    let vector = BitVector::from_bits(&[1, 0, 1, 1], false).unwrap();

    assert_eq!(vector.bit(0).unwrap(), 1);
    assert_eq!(vector.bit(1).unwrap(), 0);
    assert_eq!(vector.slice(1, 0).unwrap().binary_string(), "10");
}

#[test]
fn slice_length_matches_the_requested_range() {
    let vector = BitVector::from_unsigned(0xC5A3);

    for (high, low) in [(15, 0), (15, 15), (7, 4), (12, 3)] {
        assert_eq!(vector.slice(high, low).unwrap().len(), high - low + 1);
    }
}

#[test]
fn full_slice_preserves_the_value() {
    let vector = BitVector::from_unsigned(0xB2);
    let full = vector.slice(vector.len() - 1, 0).unwrap();

    assert_eq!(full.value().unwrap(), vector.value().unwrap());
}

#[test]
fn slices_extract_downto_fields() {
    let vector = BitVector::from_unsigned(0b0110_0101);

    assert_eq!(vector.slice(7, 4).unwrap().value().unwrap(), 0b0110);
    assert_eq!(vector.slice(3, 0).unwrap().value().unwrap(), 0b0101);
    assert_eq!(vector.slice(4, 2).unwrap().value().unwrap(), 0b001);
}

#[test]
fn rejects_inverted_and_out_of_range_slices() {
    let vector = BitVector::from_unsigned(0b1010);

    assert_eq!(
        vector.slice(1, 2).unwrap_err(),
        Error::RangeError {
            high: 1,
            low: 2,
            length: 4
        }
    );
    assert!(matches!(vector.slice(4, 0), Err(Error::RangeError { .. })));
    assert!(matches!(vector.bit(9), Err(Error::RangeError { .. })));
}

#[test]
fn hex_string_pads_to_the_vector_width() {
    let mut vector = BitVector::new();
    for _ in 0..48 {
        vector.append(0).unwrap();
    }

    assert_eq!(vector.hex_string(), "0x000000000000");
    assert_eq!(BitVector::from_unsigned(0xAB).hex_string(), "0xab");
    assert_eq!(BitVector::from_unsigned(0).hex_string(), "0x0");
    assert_eq!(BitVector::new().hex_string(), "0x0");
}

#[test]
fn value_of_an_overwide_vector_fails() {
    let mut vector = BitVector::new();
    for _ in 0..136 {
        vector.append(1).unwrap();
    }

    assert_eq!(vector.value().unwrap_err(), Error::Overflow { length: 136 });

    // Width-unlimited renderings still work: 34 hex digits for 136 bits.
    assert_eq!(vector.hex_string(), format!("0x{}", "f".repeat(34)));
}

#[test]
fn appends_grow_the_vector_in_order() {
    let mut vector = BitVector::new();
    for bit in [0, 1, 1, 0, 1] {
        vector.append(bit).unwrap();
    }

    assert_eq!(vector.len(), 5);
    assert_eq!(vector.binary_string(), "01101");
    assert_eq!(vector.value().unwrap(), 0b01101);
}
