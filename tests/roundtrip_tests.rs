//! Reconstruction round trips: a target encoded against a reference must
//! decode back to exactly the same text, case and non-ACGT characters
//! included.

mod common;

use common::{encode, expected_output, random_reference, wrap_lengths, K};
use hirgc_decompress::output::writer::write_sequence;
use hirgc_decompress::parsing::compressed::parse_compressed_text;
use hirgc_decompress::{ReconstructionConfig, ReconstructionSession, ReferenceStore};

fn decode(reference: &[u8], compressed: &str) -> (Vec<u8>, Vec<u8>) {
    let session = ReconstructionSession::new(
        ReferenceStore::from_sequence(reference),
        parse_compressed_text(compressed).unwrap(),
        ReconstructionConfig::default(),
    );
    let result = session.run().unwrap();

    let mut written = Vec::new();
    write_sequence(
        &mut written,
        &result.header,
        &result.sequence,
        &result.line_layout,
    )
    .unwrap();
    (result.sequence, written)
}

fn assert_round_trip(reference: &[u8], target: &[u8], width: usize) {
    let lengths = wrap_lengths(target.len(), width);
    let compressed = encode(reference, ">target", target, &lengths);
    let (sequence, written) = decode(reference, &compressed);

    assert_eq!(
        String::from_utf8_lossy(&sequence),
        String::from_utf8_lossy(target)
    );
    assert_eq!(written, expected_output(">target", target, &lengths));
}

#[test]
fn test_exact_copy_of_reference() {
    let reference = random_reference(300, 1);
    assert_round_trip(&reference, &reference, 60);
}

#[test]
fn test_substitutions() {
    let reference = random_reference(400, 2);
    let mut target = reference[10..300].to_vec();
    for &i in &[40, 95, 96, 180] {
        target[i] = match target[i] {
            b'A' => b'C',
            b'C' => b'G',
            b'G' => b'T',
            _ => b'A',
        };
    }
    assert_round_trip(&reference, &target, 70);
}

#[test]
fn test_insertions_and_deletions() {
    let reference = random_reference(400, 3);
    let mut target = reference[0..100].to_vec();
    target.extend_from_slice(b"GATTACA");
    target.extend_from_slice(&reference[100..180]);
    // deletion: skip 30 reference bases
    target.extend_from_slice(&reference[210..320]);
    assert_round_trip(&reference, &target, 50);
}

#[test]
fn test_backward_jump_reuses_reference() {
    let reference = random_reference(300, 4);
    let mut target = reference[150..250].to_vec();
    target.push(b'T');
    target.extend_from_slice(&reference[20..120]);
    target.extend_from_slice(&reference[150..200]);

    let lengths = wrap_lengths(target.len(), 60);
    let compressed = encode(&reference, ">target", &target, &lengths);
    assert!(compressed.contains("\n-"), "expected a negative offset:\n{compressed}");

    assert_round_trip(&reference, &target, 60);
}

#[test]
fn test_case_n_runs_and_special_characters() {
    let reference = random_reference(500, 5);
    let mut target = Vec::new();
    target.extend_from_slice(b"NNNNNNNNNN");
    target.extend_from_slice(&reference[0..80]);
    target.extend_from_slice(b"RY");
    target.extend_from_slice(&reference[80..160]);
    target.extend_from_slice(b"NNNNN");
    target.push(b'M');
    target.extend_from_slice(&reference[160..260]);
    target.push(b'R');
    target.extend_from_slice(&reference[260..300]);
    target.extend_from_slice(b"NN");

    // soft-mask stretches covering bases, special characters and an N run
    for b in &mut target[75..100] {
        *b = b.to_ascii_lowercase();
    }
    for b in &mut target[170..180] {
        *b = b.to_ascii_lowercase();
    }

    assert_round_trip(&reference, &target, 60);
}

#[test]
fn test_special_character_at_both_ends() {
    let reference = random_reference(200, 6);
    let mut target = vec![b'K'];
    target.extend_from_slice(&reference[5..105]);
    target.push(b'W');
    assert_round_trip(&reference, &target, 33);
}

#[test]
fn test_entire_target_lowercase() {
    let reference = random_reference(200, 7);
    let target = reference[0..150].to_ascii_lowercase();
    assert_round_trip(&reference, &target, 60);
}

#[test]
fn test_minimal_target_is_one_anchor() {
    let reference = random_reference(100, 8);
    let target = reference[30..30 + K].to_vec();
    assert_round_trip(&reference, &target, 60);
}

#[test]
fn test_reference_from_fasta_text() {
    use hirgc_decompress::parsing::reference::parse_reference_text;
    use hirgc_decompress::utils::validation::DEFAULT_MAX_SEQUENCE_LENGTH;

    let reference = random_reference(240, 9);
    let fasta = common::to_fasta("ref", &reference.to_ascii_lowercase());
    let store = parse_reference_text(&fasta, DEFAULT_MAX_SEQUENCE_LENGTH).unwrap();
    assert_eq!(store.as_bytes(), &reference[..]);
}
