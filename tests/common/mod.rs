//! Test fixtures: a deterministic reference generator and a minimal encoder
//! producing the compressed format the decoder reads.

#![allow(dead_code)]

/// Seed length the encoder requires for every reference match
pub const K: usize = 20;

/// Pseudo-random ACGT sequence; long exact repeats are vanishingly rare.
pub fn random_reference(len: usize, seed: u64) -> Vec<u8> {
    let mut state = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            b"ACGT"[(state >> 62) as usize]
        })
        .collect()
}

/// Wrap a reference as FASTA with 60-column lines.
pub fn to_fasta(name: &str, sequence: &[u8]) -> String {
    let mut out = format!(">{name}\n");
    for line in sequence.chunks(60) {
        out.push_str(std::str::from_utf8(line).unwrap());
        out.push('\n');
    }
    out
}

/// Line lengths of `len` characters wrapped at `width`.
pub fn wrap_lengths(len: usize, width: usize) -> Vec<usize> {
    let mut lengths = vec![width; len / width];
    if len % width != 0 {
        lengths.push(len % width);
    }
    lengths
}

fn join(values: &[usize]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn runs<F: Fn(u8) -> bool>(seq: &[u8], pred: F) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < seq.len() {
        if pred(seq[i]) {
            let start = i;
            while i < seq.len() && pred(seq[i]) {
                i += 1;
            }
            out.push((start, i - start));
        } else {
            i += 1;
        }
    }
    out
}

fn range_line(ranges: &[(usize, usize)]) -> String {
    let mut values = vec![ranges.len()];
    let mut prev_end = 0;
    for &(start, len) in ranges {
        values.push(start - prev_end);
        values.push(len);
        prev_end = start + len;
    }
    join(&values)
}

fn longest_match(reference: &[u8], target: &[u8], at: usize) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    for p in 0..reference.len() {
        let len = reference[p..]
            .iter()
            .zip(&target[at..])
            .take_while(|(a, b)| a == b)
            .count();
        if len >= K && best.map_or(true, |(_, l)| len > l) {
            best = Some((p, len));
        }
    }
    best
}

fn code(base: u8) -> char {
    match base {
        b'A' => '0',
        b'C' => '1',
        b'G' => '2',
        b'T' => '3',
        other => panic!("not a base: {}", other as char),
    }
}

/// Encode `target` against `reference`. The ACGT-only core of the target
/// must start and end with a stretch of at least `K` bases copied from the
/// reference.
pub fn encode(reference: &[u8], header: &str, target: &[u8], line_lengths: &[usize]) -> String {
    assert_eq!(line_lengths.iter().sum::<usize>(), target.len());

    // lowercase, in final coordinates
    let lowercase = runs(target, |b| b.is_ascii_lowercase());
    let upper: Vec<u8> = target.iter().map(u8::to_ascii_uppercase).collect();

    // N runs, in coordinates with special characters still present
    let n_runs = runs(&upper, |b| b == b'N');
    let without_n: Vec<u8> = upper.iter().copied().filter(|&b| b != b'N').collect();

    // special characters, in coordinates of the sequence without N
    let mut positions = Vec::new();
    let mut dictionary: Vec<u8> = Vec::new();
    let mut order = String::new();
    for (i, &b) in without_n.iter().enumerate() {
        if !matches!(b, b'A' | b'C' | b'G' | b'T') {
            positions.push(i);
            let idx = match dictionary.iter().position(|&d| d == b) {
                Some(idx) => idx,
                None => {
                    dictionary.push(b);
                    dictionary.len() - 1
                }
            };
            order.push_str(&idx.to_string());
        }
    }
    let core: Vec<u8> = without_n
        .iter()
        .copied()
        .filter(|b| matches!(b, b'A' | b'C' | b'G' | b'T'))
        .collect();

    let mut special = vec![positions.len()];
    let mut prev: Option<usize> = None;
    for &p in &positions {
        special.push(match prev {
            None => p,
            Some(q) => p - q - 1,
        });
        prev = Some(p);
    }
    special.push(dictionary.len());
    special.extend(dictionary.iter().map(|&c| usize::from(c - b'A')));

    // layout: leading value count, then (length, repeat) pairs
    let mut pairs: Vec<(usize, usize)> = Vec::new();
    for &len in line_lengths {
        match pairs.last_mut() {
            Some((l, rep)) if *l == len => *rep += 1,
            _ => pairs.push((len, 1)),
        }
    }
    let mut layout = vec![pairs.len() * 2];
    for (l, r) in pairs {
        layout.push(l);
        layout.push(r);
    }

    // edit script
    let (first_pos, first_len) =
        longest_match(reference, &core, 0).expect("target must start with a reference match");
    let mut cursor = first_pos + first_len;
    let mut t = first_len;
    let mut body = String::new();
    while t < core.len() {
        let mut literals = String::new();
        let (pos, len) = loop {
            if let Some(found) = longest_match(reference, &core, t) {
                break found;
            }
            literals.push(code(core[t]));
            t += 1;
            assert!(t < core.len(), "target must end with a reference match");
        };
        let offset = pos as i64 - cursor as i64;
        body.push_str(&format!("{literals}\n{offset} {}\n", len - K));
        cursor = pos + len;
        t += len;
    }

    format!(
        "{header}\n\n{}\n{}\n{}\n{} {order}\n{first_pos} {}\n{body}",
        join(&layout),
        range_line(&lowercase),
        range_line(&n_runs),
        join(&special),
        first_len - K,
    )
}

/// Render the expected writer output for a target.
pub fn expected_output(header: &str, target: &[u8], line_lengths: &[usize]) -> Vec<u8> {
    let mut out = format!("{header}\n\n").into_bytes();
    let mut rest = target;
    for &len in line_lengths {
        let (line, tail) = rest.split_at(len);
        out.extend_from_slice(line);
        out.push(b'\n');
        rest = tail;
    }
    out
}
