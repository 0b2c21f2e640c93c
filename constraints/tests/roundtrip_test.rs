use ark_bn254::Fr;
use constraints::{
    Coeff, Constraint, ConstraintSystem, LinearCombination, LogEntry, SolveMethod, Term, Wire,
    ONE_WIRE,
};

/// A system exercising every encodable feature: both solve methods, all five
/// coefficient encodings, name lists, logs, and debug info.
fn make_full_system() -> ConstraintSystem<Fr> {
    // wires: [p (0), bit0..bit3 (1..5), x (5), y (6), one (7), out (8)]
    let mut cs = ConstraintSystem::new(9, 2, 2);
    cs.secret_names = vec!["x".to_string(), "y".to_string()];
    cs.public_names = vec![ONE_WIRE.to_string(), "out".to_string()];

    let four = cs.coeff(Fr::from(4u64));
    let eight = cs.coeff(Fr::from(8u64));

    // x * y = p
    cs.constraints.push(Constraint {
        l: LinearCombination::from_wire(Wire(5)),
        r: LinearCombination::from_wire(Wire(6)),
        o: LinearCombination::from_wire(Wire(0)),
        method: SolveMethod::SingleOutput,
    });

    // bits of p: 1*b0 + 2*b1 + 4*b2 + 8*b3, deliberately out of order
    cs.constraints.push(Constraint {
        l: LinearCombination::from(vec![
            Term::new(Wire(3), four),
            Term::new(Wire(1), Coeff::One),
            Term::new(Wire(4), eight),
            Term::new(Wire(2), Coeff::Two),
        ]),
        r: LinearCombination::from_wire(Wire(7)),
        o: LinearCombination::from_wire(Wire(0)),
        method: SolveMethod::BinaryDec,
    });
    cs.nb_computational = 2;

    // assertion: p - out = 0, i.e. (p - out) * one = 0
    cs.constraints.push(Constraint {
        l: LinearCombination::from(vec![
            Term::new(Wire(0), Coeff::One),
            Term::new(Wire(8), Coeff::MinusOne),
        ]),
        r: LinearCombination::from_wire(Wire(7)),
        o: LinearCombination::from(vec![Term::new(Wire(7), Coeff::Zero)]),
        method: SolveMethod::SingleOutput,
    });

    cs.logs.push(LogEntry {
        format: "product is {}".to_string(),
        to_resolve: vec![0],
    });
    cs.debug_info.push(LogEntry {
        format: "{} != {}".to_string(),
        to_resolve: vec![0, 8],
    });

    cs
}

#[test]
fn test_roundtrip_full_system() {
    let cs = make_full_system();
    let mut buf = Vec::new();
    let written = cs.write_to(&mut buf).unwrap();
    assert_eq!(written, buf.len() as u64);

    let (reconstructed, read) = ConstraintSystem::<Fr>::read_from(&buf[..]).unwrap();
    assert_eq!(written, read);
    assert_eq!(cs, reconstructed);
}

#[test]
fn test_roundtrip_empty_system() {
    let cs = ConstraintSystem::<Fr>::new(0, 0, 0);
    let mut buf = Vec::new();
    let written = cs.write_to(&mut buf).unwrap();

    let (reconstructed, read) = ConstraintSystem::<Fr>::read_from(&buf[..]).unwrap();
    assert_eq!(written, read);
    assert_eq!(cs, reconstructed);
}

#[test]
fn test_roundtrip_no_constraints_with_names() {
    let mut cs = ConstraintSystem::<Fr>::new(3, 2, 1);
    cs.secret_names = vec!["w".to_string()];
    cs.public_names = vec![ONE_WIRE.to_string(), "v".to_string()];

    let mut buf = Vec::new();
    let written = cs.write_to(&mut buf).unwrap();
    let (reconstructed, read) = ConstraintSystem::<Fr>::read_from(&buf[..]).unwrap();
    assert_eq!(written, read);
    assert_eq!(cs, reconstructed);
}

#[test]
fn test_encoding_is_deterministic() {
    let cs = make_full_system();
    let mut first = Vec::new();
    let mut second = Vec::new();
    cs.write_to(&mut first).unwrap();
    cs.write_to(&mut second).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_roundtrip_preserves_term_order() {
    let cs = make_full_system();
    let mut buf = Vec::new();
    cs.write_to(&mut buf).unwrap();
    let (reconstructed, _) = ConstraintSystem::<Fr>::read_from(&buf[..]).unwrap();

    // the binary-decomposition L was built out of bit order; that order is
    // part of the system's meaning and must survive
    let lc = &reconstructed.constraints[1].l;
    assert_eq!(lc.terms[0].wire, Wire(3));
    assert_eq!(lc.terms[1].wire, Wire(1));
    assert_eq!(lc.terms[2].wire, Wire(4));
    assert_eq!(lc.terms[3].wire, Wire(2));
}
