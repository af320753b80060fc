//! # Instruction Codec Tests
//!
//! Bit-exact packing of the five instruction fields and of memory images.

use mcsim_core::common::ImageError;
use mcsim_core::isa::instruction::{pack_cell, select_half};
use mcsim_core::isa::{Instr, Opcode, build_image, try_build_image};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn test_field_layout() {
    let instr = Instr::new(Opcode::Addi, 1, 2, 3, 0xABC);
    let word = instr.as_u32();
    assert_eq!(word & 0x1F, 1);
    assert_eq!((word >> 5) & 0x1F, 1);
    assert_eq!((word >> 10) & 0x1F, 2);
    assert_eq!((word >> 15) & 0x1F, 3);
    assert_eq!(word >> 20, 0xABC);
}

#[test]
fn test_known_word() {
    // addi r1, r0, 5
    assert_eq!(Instr::new(Opcode::Addi, 1, 0, 0, 5).as_u32(), 0x0050_0021);
    assert_eq!(Instr::from_u32(0x0050_0021), Instr::new(Opcode::Addi, 1, 0, 0, 5));
}

#[test]
fn test_new_truncates_fields() {
    let instr = Instr::new(Opcode::Add, 0xFF, 33, 32, 0xFFFF);
    assert_eq!(instr.rd, 31);
    assert_eq!(instr.rs, 1);
    assert_eq!(instr.rt, 0);
    assert_eq!(instr.imm, 0xFFF);
}

#[test]
fn test_every_opcode_decodes() {
    for (bits, op) in Opcode::ALL.iter().enumerate() {
        assert_eq!(op.bits() as usize, bits);
        assert_eq!(Opcode::from_u5(bits as u8), *op);
    }
}

#[test]
fn test_build_image_packs_low_first() {
    let a = Instr::new(Opcode::Addi, 0, 0, 0, 5);
    let b = Instr::new(Opcode::Halt, 0, 0, 0, 0);
    let image = build_image(&[a, b]);
    assert_eq!(image, vec![pack_cell(a, b)]);
    assert_eq!(select_half(image[0], 0), a.as_u32());
    assert_eq!(select_half(image[0], 4), b.as_u32());
}

#[test]
fn test_try_build_image_rejects_odd_count() {
    let instr = Instr::new(Opcode::Halt, 0, 0, 0, 0);
    assert!(matches!(
        try_build_image(&[instr]),
        Err(ImageError::OddInstructionCount(1))
    ));
    assert_eq!(try_build_image(&[]).map(|cells| cells.len()).ok(), Some(0));
}

#[test]
#[should_panic(expected = "even number")]
fn test_build_image_odd_count_is_fatal() {
    let _ = build_image(&[Instr::default()]);
}

proptest! {
    #[test]
    fn prop_word_round_trip(word in any::<u32>()) {
        prop_assert_eq!(Instr::from_u32(word).as_u32(), word);
    }

    #[test]
    fn prop_fields_round_trip(
        op in 0u8..32,
        rd in 0u8..32,
        rs in 0u8..32,
        rt in 0u8..32,
        imm in 0u16..4096,
    ) {
        let instr = Instr::new(Opcode::from_u5(op), rd, rs, rt, imm);
        prop_assert_eq!(Instr::from(u32::from(instr)), instr);
    }

    #[test]
    fn prop_select_half_by_bit_two(cell in any::<u64>(), base in 0u64..1024) {
        let addr = base & !0x7;
        prop_assert_eq!(select_half(cell, addr), cell as u32);
        prop_assert_eq!(select_half(cell, addr + 4), (cell >> 32) as u32);
    }
}
