// Internal imports
use crate::decode::{decode, Decoder};
use crate::display::render_lines;
use crate::error::DecodeError;
use crate::settings::DecodeSettings;

#[test]
fn test_mov_reg_reg() {
    println!("===========================Test 1.1=============================");
    let inst_stream = vec![0x89, 0xD9, 0x88, 0xD9];
    let expected_insts = vec!["mov cx, bx", "mov cl, bl"];
    check_decode(inst_stream, expected_insts);
}

#[test]
fn test_direction_bit() {
    let inst_stream = vec![0b10001001, 0b11011110, 0b10001011, 0b11011110];
    let expected_insts = vec!["mov si, bx", "mov bx, si"];
    check_decode(inst_stream, expected_insts);
}

#[test]
fn test_mov_imm_reg() {
    let inst_stream = vec![
        0b10110001, 0b00000101, // mov cl, 5
        0b10111001, 0b00000101, 0b00000000, // mov cx, 5
        0xB1, 0xF4, // mov cl, -12
        0xBA, 0x6C, 0x0F, // mov dx, 3948
        0xBA, 0x94, 0xF0, // mov dx, -3948
    ];
    let expected_insts = vec![
        "mov cl, 5",
        "mov cx, 5",
        "mov cl, -12",
        "mov dx, 3948",
        "mov dx, -3948",
    ];
    check_decode(inst_stream, expected_insts);
}

/// Source-address calculation and destination-address calculation, including
/// signed displacements and the direct address form
#[test]
fn test_mov_memory() {
    let inst_stream = vec![
        0x8A, 0x00, // mov al, [bx + si]
        0x8B, 0x1B, // mov bx, [bp + di]
        0x8B, 0x56, 0x00, // mov dx, [bp]
        0x8A, 0x60, 0x04, // mov ah, [bx + si + 4]
        0x8A, 0x80, 0x87, 0x13, // mov al, [bx + si + 4999]
        0x89, 0x09, // mov [bx + di], cx
        0x88, 0x0A, // mov [bp + si], cl
        0x88, 0x6E, 0x00, // mov [bp], ch
        0x8B, 0x41, 0xDB, // mov ax, [bx + di - 37]
        0x89, 0x8C, 0xD4, 0xFE, // mov [si - 300], cx
        0x8B, 0x57, 0xE0, // mov dx, [bx - 32]
        0x8B, 0x2E, 0x05, 0x00, // mov bp, [5]
        0x8B, 0x1E, 0x82, 0x0D, // mov bx, [3458]
    ];
    let expected_insts = vec![
        "mov al, [bx + si]",
        "mov bx, [bp + di]",
        "mov dx, [bp]",
        "mov ah, [bx + si + 4]",
        "mov al, [bx + si + 4999]",
        "mov [bx + di], cx",
        "mov [bp + si], cl",
        "mov [bp], ch",
        "mov ax, [bx + di - 37]",
        "mov [si - 300], cx",
        "mov dx, [bx - 32]",
        "mov bp, [5]",
        "mov bx, [3458]",
    ];
    check_decode(inst_stream, expected_insts);
}

#[test]
fn test_bytes_consumed_sum_to_stream_length() {
    // No displacement, 8-bit displacement, 16-bit displacement
    let inst_stream = vec![0x8B, 0x18, 0x8B, 0x58, 0x7F, 0x8B, 0x98, 0x00, 0x01];
    let output = decode(&inst_stream, &DecodeSettings::default());
    assert_eq!(output.error, None);
    let lengths: Vec<usize> = output.instructions.iter().map(|i| i.length).collect();
    assert_eq!(lengths, vec![2, 3, 4]);
    assert_eq!(output.bytes_decoded(), inst_stream.len());
}

#[test]
fn test_decode_is_deterministic() {
    let inst_stream = vec![0x89, 0xD9, 0xB9, 0x05, 0x00, 0x8A, 0x60, 0x04];
    let settings = DecodeSettings::default();
    let first = decode(&inst_stream, &settings);
    let second = decode(&inst_stream, &settings);
    assert_eq!(first, second);
    assert_eq!(
        render_lines(&inst_stream, &first, false),
        render_lines(&inst_stream, &second, false)
    );
}

#[test]
fn test_stray_byte_halts() {
    let inst_stream = vec![0x89, 0xD9, 0b11111111, 0x88, 0xD9];
    let output = decode(&inst_stream, &DecodeSettings::default());
    assert_eq!(output.instructions.len(), 1);
    assert_eq!(
        output.error,
        Some(DecodeError::UnrecognizedOpcode {
            offset: 2,
            byte: 0xFF
        })
    );
    let lines = render_lines(&inst_stream, &output, false);
    assert_eq!(
        lines,
        vec![
            "mov cx, bx",
            "; decoding stopped: unrecognized opcode 0b11111111 (0xFF) at offset 2"
        ]
    );
}

#[test]
fn test_truncated_immediate() {
    let inst_stream = vec![0b10111001, 0b00000101];
    let mut decoder = Decoder::new(&inst_stream);
    assert_eq!(
        decoder.next(),
        Some(Err(DecodeError::TruncatedStream {
            offset: 0,
            opcode: 0b10111001,
            needed: 2,
            available: 1,
        }))
    );
    assert_eq!(decoder.next(), None);
}

#[test]
fn test_listing_lines() {
    let inst_stream = vec![0x89, 0xD9, 0xB1, 0x05];
    let output = decode(&inst_stream, &DecodeSettings::default());
    let lines = render_lines(&inst_stream, &output, true);
    assert_eq!(
        lines,
        vec!["; 0000: 89 d9", "mov cx, bx", "; 0002: b1 05", "mov cl, 5"]
    );
}

fn check_decode(inst_stream: Vec<u8>, expected_insts: Vec<&str>) {
    let decode_settings = DecodeSettings {
        ..Default::default()
    };
    let output = decode(&inst_stream, &decode_settings);
    assert_eq!(output.error, None);
    assert_eq!(output.instructions.len(), expected_insts.len());
    let mut inst_num = 1;
    for (inst, expected_inst) in std::iter::zip(output.instructions, expected_insts) {
        let actual_inst = inst.to_string();
        println!("-------------------------Inst {inst_num}-------------------------------");
        println!("Expected inst: {}", expected_inst);
        println!("Actual   inst: {}", actual_inst);
        if actual_inst != expected_inst {
            println!("++++++++++++++++++++++++++");
            println!("{:#?}", inst);
            println!("---------------------------------------------------------------------");
        }
        assert!(actual_inst == expected_inst);
        inst_num += 1;
    }
    println!("---------------------------------------------------------------------");
}
