/// Binary codec for [`ConstraintSystem`].
///
/// A compact little-endian encoding: magic + version, wire counts, name
/// lists, constraints, the coefficient table (ark-serialize compressed
/// field elements), and the log/debug tables. Decoding reconstructs a
/// value-identical system or fails with a [`CodecError`]; no partial system
/// is ever returned. Both directions report the exact byte count so callers
/// can verify that a round trip read everything it wrote.

use std::fmt;
use std::io::{self, Read, Write};

use ark_ff::PrimeField;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize, SerializationError};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::r1cs::{Constraint, ConstraintSystem, LogEntry, SolveMethod};
use crate::term::{Coeff, LinearCombination, Term, Wire};

const MAGIC: &[u8; 4] = b"zkcs";
const VERSION: u32 = 1;

// coefficient tags
const TAG_ZERO: u8 = 0;
const TAG_ONE: u8 = 1;
const TAG_MINUS_ONE: u8 = 2;
const TAG_TWO: u8 = 3;
const TAG_TABLE: u8 = 4;

// solve-method tags
const TAG_SINGLE_OUTPUT: u8 = 0;
const TAG_BINARY_DEC: u8 = 1;

// ============================================================================
// CodecError
// ============================================================================

/// Errors surfaced by `write_to` / `read_from`.
#[derive(Debug)]
pub enum CodecError {
    Io(io::Error),
    /// The stream does not start with the expected magic bytes.
    BadMagic([u8; 4]),
    /// The stream was written by an incompatible structural version.
    UnsupportedVersion(u32),
    /// Unknown solve-method tag in a constraint.
    InvalidMethodTag(u8),
    /// Unknown coefficient tag in a term.
    InvalidCoeffTag(u8),
    /// A name or format string is not valid UTF-8.
    InvalidUtf8,
    /// A field element failed to (de)serialize.
    Field(SerializationError),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Io(e) => write!(f, "i/o error: {e}"),
            CodecError::BadMagic(m) => write!(f, "bad magic bytes {m:?}, not a constraint system"),
            CodecError::UnsupportedVersion(v) => write!(f, "unsupported format version {v}"),
            CodecError::InvalidMethodTag(t) => write!(f, "invalid solve-method tag {t}"),
            CodecError::InvalidCoeffTag(t) => write!(f, "invalid coefficient tag {t}"),
            CodecError::InvalidUtf8 => write!(f, "string field is not valid UTF-8"),
            CodecError::Field(e) => write!(f, "field element encoding: {e}"),
        }
    }
}

impl std::error::Error for CodecError {}

impl From<io::Error> for CodecError {
    fn from(e: io::Error) -> Self {
        CodecError::Io(e)
    }
}

impl From<SerializationError> for CodecError {
    fn from(e: SerializationError) -> Self {
        CodecError::Field(e)
    }
}

// ============================================================================
// Counting wrappers
// ============================================================================

/// Wraps a writer and counts the bytes that pass through.
struct CountingWriter<W: Write> {
    inner: W,
    count: u64,
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.count += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Wraps a reader and counts the bytes that pass through.
struct CountingReader<R: Read> {
    inner: R,
    count: u64,
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.count += n as u64;
        Ok(n)
    }
}

// ============================================================================
// Encoding
// ============================================================================

fn write_string<W: Write>(w: &mut W, s: &str) -> Result<(), CodecError> {
    w.write_u32::<LittleEndian>(s.len() as u32)?;
    w.write_all(s.as_bytes())?;
    Ok(())
}

fn write_names<W: Write>(w: &mut W, names: &[String]) -> Result<(), CodecError> {
    w.write_u32::<LittleEndian>(names.len() as u32)?;
    for name in names {
        write_string(w, name)?;
    }
    Ok(())
}

fn write_term<W: Write>(w: &mut W, term: &Term) -> Result<(), CodecError> {
    w.write_u32::<LittleEndian>(term.wire.index() as u32)?;
    match term.coeff {
        Coeff::Zero => w.write_u8(TAG_ZERO)?,
        Coeff::One => w.write_u8(TAG_ONE)?,
        Coeff::MinusOne => w.write_u8(TAG_MINUS_ONE)?,
        Coeff::Two => w.write_u8(TAG_TWO)?,
        Coeff::Table(i) => {
            w.write_u8(TAG_TABLE)?;
            w.write_u32::<LittleEndian>(i)?;
        }
    }
    Ok(())
}

fn write_lc<W: Write>(w: &mut W, lc: &LinearCombination) -> Result<(), CodecError> {
    w.write_u32::<LittleEndian>(lc.terms.len() as u32)?;
    for term in &lc.terms {
        write_term(w, term)?;
    }
    Ok(())
}

fn write_log<W: Write>(w: &mut W, entry: &LogEntry) -> Result<(), CodecError> {
    write_string(w, &entry.format)?;
    w.write_u32::<LittleEndian>(entry.to_resolve.len() as u32)?;
    for &wire in &entry.to_resolve {
        w.write_u32::<LittleEndian>(wire as u32)?;
    }
    Ok(())
}

fn write_logs<W: Write>(w: &mut W, entries: &[LogEntry]) -> Result<(), CodecError> {
    w.write_u32::<LittleEndian>(entries.len() as u32)?;
    for entry in entries {
        write_log(w, entry)?;
    }
    Ok(())
}

// ============================================================================
// Decoding
// ============================================================================

fn read_string<R: Read>(r: &mut R) -> Result<String, CodecError> {
    let len = r.read_u32::<LittleEndian>()? as usize;
    let mut buf = vec![0u8; len];
    r.read_exact(&mut buf)?;
    String::from_utf8(buf).map_err(|_| CodecError::InvalidUtf8)
}

fn read_names<R: Read>(r: &mut R) -> Result<Vec<String>, CodecError> {
    let count = r.read_u32::<LittleEndian>()? as usize;
    let mut names = Vec::with_capacity(count);
    for _ in 0..count {
        names.push(read_string(r)?);
    }
    Ok(names)
}

fn read_term<R: Read>(r: &mut R) -> Result<Term, CodecError> {
    let wire = Wire(r.read_u32::<LittleEndian>()? as usize);
    let coeff = match r.read_u8()? {
        TAG_ZERO => Coeff::Zero,
        TAG_ONE => Coeff::One,
        TAG_MINUS_ONE => Coeff::MinusOne,
        TAG_TWO => Coeff::Two,
        TAG_TABLE => Coeff::Table(r.read_u32::<LittleEndian>()?),
        tag => return Err(CodecError::InvalidCoeffTag(tag)),
    };
    Ok(Term::new(wire, coeff))
}

fn read_lc<R: Read>(r: &mut R) -> Result<LinearCombination, CodecError> {
    let count = r.read_u32::<LittleEndian>()? as usize;
    let mut terms = Vec::with_capacity(count);
    for _ in 0..count {
        terms.push(read_term(r)?);
    }
    Ok(LinearCombination { terms })
}

fn read_log<R: Read>(r: &mut R) -> Result<LogEntry, CodecError> {
    let format = read_string(r)?;
    let count = r.read_u32::<LittleEndian>()? as usize;
    let mut to_resolve = Vec::with_capacity(count);
    for _ in 0..count {
        to_resolve.push(r.read_u32::<LittleEndian>()? as usize);
    }
    Ok(LogEntry { format, to_resolve })
}

fn read_logs<R: Read>(r: &mut R) -> Result<Vec<LogEntry>, CodecError> {
    let count = r.read_u32::<LittleEndian>()? as usize;
    let mut entries = Vec::with_capacity(count);
    for _ in 0..count {
        entries.push(read_log(r)?);
    }
    Ok(entries)
}

// ============================================================================
// ConstraintSystem entry points
// ============================================================================

impl<F: PrimeField> ConstraintSystem<F> {
    /// Serialize into `writer`. Returns the number of bytes written.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<u64, CodecError> {
        let mut w = CountingWriter { inner: writer, count: 0 };

        w.write_all(MAGIC)?;
        w.write_u32::<LittleEndian>(VERSION)?;

        w.write_u32::<LittleEndian>(self.nb_wires as u32)?;
        w.write_u32::<LittleEndian>(self.nb_public_wires as u32)?;
        w.write_u32::<LittleEndian>(self.nb_secret_wires as u32)?;
        w.write_u32::<LittleEndian>(self.nb_computational as u32)?;

        write_names(&mut w, &self.secret_names)?;
        write_names(&mut w, &self.public_names)?;

        w.write_u32::<LittleEndian>(self.constraints.len() as u32)?;
        for c in &self.constraints {
            let tag = match c.method {
                SolveMethod::SingleOutput => TAG_SINGLE_OUTPUT,
                SolveMethod::BinaryDec => TAG_BINARY_DEC,
            };
            w.write_u8(tag)?;
            write_lc(&mut w, &c.l)?;
            write_lc(&mut w, &c.r)?;
            write_lc(&mut w, &c.o)?;
        }

        w.write_u32::<LittleEndian>(self.coefficients.len() as u32)?;
        for coeff in &self.coefficients {
            coeff.serialize_compressed(&mut w)?;
        }

        write_logs(&mut w, &self.logs)?;
        write_logs(&mut w, &self.debug_info)?;

        w.flush()?;
        Ok(w.count)
    }

    /// Deserialize from `reader`. Returns the system and the number of
    /// bytes read. Fails without partial state on any malformed input.
    pub fn read_from<R: Read>(reader: R) -> Result<(Self, u64), CodecError> {
        let mut r = CountingReader { inner: reader, count: 0 };

        let mut magic = [0u8; 4];
        r.read_exact(&mut magic)?;
        if &magic != MAGIC {
            return Err(CodecError::BadMagic(magic));
        }
        let version = r.read_u32::<LittleEndian>()?;
        if version != VERSION {
            return Err(CodecError::UnsupportedVersion(version));
        }

        let nb_wires = r.read_u32::<LittleEndian>()? as usize;
        let nb_public_wires = r.read_u32::<LittleEndian>()? as usize;
        let nb_secret_wires = r.read_u32::<LittleEndian>()? as usize;
        let nb_computational = r.read_u32::<LittleEndian>()? as usize;

        let secret_names = read_names(&mut r)?;
        let public_names = read_names(&mut r)?;

        let nb_constraints = r.read_u32::<LittleEndian>()? as usize;
        let mut constraints = Vec::with_capacity(nb_constraints);
        for _ in 0..nb_constraints {
            let method = match r.read_u8()? {
                TAG_SINGLE_OUTPUT => SolveMethod::SingleOutput,
                TAG_BINARY_DEC => SolveMethod::BinaryDec,
                tag => return Err(CodecError::InvalidMethodTag(tag)),
            };
            let l = read_lc(&mut r)?;
            let rr = read_lc(&mut r)?;
            let o = read_lc(&mut r)?;
            constraints.push(Constraint { l, r: rr, o, method });
        }

        let nb_coefficients = r.read_u32::<LittleEndian>()? as usize;
        let mut coefficients = Vec::with_capacity(nb_coefficients);
        for _ in 0..nb_coefficients {
            coefficients.push(F::deserialize_compressed(&mut r)?);
        }

        let logs = read_logs(&mut r)?;
        let debug_info = read_logs(&mut r)?;

        let cs = ConstraintSystem {
            nb_wires,
            nb_public_wires,
            nb_secret_wires,
            secret_names,
            public_names,
            logs,
            debug_info,
            nb_computational,
            constraints,
            coefficients,
        };
        Ok((cs, r.count))
    }
}

// ============================================================================
// Tests
// ============================================================================
