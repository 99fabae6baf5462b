//! Flat-file persistence for sandbox objects
//!
//! One comma-separated record per object, preceded by a header line:
//! `PositionX,PositionY,VelocityX,VelocityY,ColorR,ColorG,ColorB,Mass,Type,Extra1,Extra2`
//!
//! Color channels are persisted at 0-255 integer scale (internally 0-1
//! floats); alpha is not persisted and comes back fully opaque. `Extra1` is
//! the radius for circles and the side length for squares and triangles;
//! rectangles use `Extra1,Extra2` as width,height.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use physim_math::Vec2;
use physim_physics::{PhysicalObject, Shape, ShapeKind};

use crate::world::Sandbox;

/// Header line written before the records
pub const HEADER: &str =
    "PositionX,PositionY,VelocityX,VelocityY,ColorR,ColorG,ColorB,Mass,Type,Extra1,Extra2";

/// Error type for store operations
#[derive(Debug)]
pub enum StoreError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// A record line failed to parse (1-based line number)
    Parse { line: usize, message: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(err) => write!(f, "store IO error: {}", err),
            StoreError::Parse { line, message } => {
                write!(f, "store parse error at line {}: {}", line, message)
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(err) => Some(err),
            StoreError::Parse { .. } => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(err: io::Error) -> Self {
        StoreError::Io(err)
    }
}

/// Serialize one object to its record line
pub fn to_record(object: &PhysicalObject) -> String {
    let extra = match object.shape() {
        Shape::Circle { radius } => format!("{}", radius),
        Shape::Square { side } => format!("{}", side),
        Shape::Triangle { side } => format!("{}", side),
        Shape::Rectangle { width, height } => format!("{},{}", width, height),
    };
    format!(
        "{},{},{},{},{},{},{},{},{},{}",
        object.position.x,
        object.position.y,
        object.velocity.x,
        object.velocity.y,
        (object.color[0] * 255.0) as u8,
        (object.color[1] * 255.0) as u8,
        (object.color[2] * 255.0) as u8,
        object.mass(),
        object.kind().code(),
        extra,
    )
}

/// Parse one record line into an object
pub fn parse_record(line: &str) -> Result<PhysicalObject, String> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < 10 {
        return Err(format!("expected at least 10 fields, got {}", fields.len()));
    }

    let number = |index: usize, name: &str| -> Result<f32, String> {
        fields[index]
            .parse::<f32>()
            .map_err(|_| format!("invalid {}: '{}'", name, fields[index]))
    };

    let position = Vec2::new(number(0, "PositionX")?, number(1, "PositionY")?);
    let velocity = Vec2::new(number(2, "VelocityX")?, number(3, "VelocityY")?);
    // Persisted at 0-255; alpha is not stored and reloads opaque
    let color = [
        number(4, "ColorR")? / 255.0,
        number(5, "ColorG")? / 255.0,
        number(6, "ColorB")? / 255.0,
        1.0,
    ];
    let mass = number(7, "Mass")?;

    let code = fields[8]
        .parse::<u32>()
        .map_err(|_| format!("invalid Type: '{}'", fields[8]))?;
    let kind = ShapeKind::from_code(code).ok_or_else(|| format!("unknown Type code {}", code))?;

    let shape = match kind {
        ShapeKind::Circle => Shape::Circle { radius: number(9, "Extra1")? },
        ShapeKind::Square => Shape::Square { side: number(9, "Extra1")? },
        ShapeKind::Triangle => Shape::Triangle { side: number(9, "Extra1")? },
        ShapeKind::Rectangle => {
            if fields.len() < 11 {
                return Err("rectangle record is missing Extra2".to_string());
            }
            Shape::Rectangle {
                width: number(9, "Extra1")?,
                height: number(10, "Extra2")?,
            }
        }
        ShapeKind::Convex => return Err("Type code 4 (convex) is not implemented".to_string()),
    };

    PhysicalObject::new(position, velocity, color, mass, shape).map_err(|e| e.to_string())
}

/// Save every sandbox object to `path`, header first
///
/// A file that cannot be created is a recoverable failure; nothing is
/// written.
pub fn save<P: AsRef<Path>>(path: P, sandbox: &Sandbox) -> Result<(), StoreError> {
    let path = path.as_ref();
    let mut file = File::create(path)?;
    writeln!(file, "{}", HEADER)?;
    for object in sandbox.objects() {
        writeln!(file, "{}", to_record(object))?;
    }
    log::info!(
        "saved {} objects to {}",
        sandbox.objects().len(),
        path.display()
    );
    Ok(())
}

/// Load objects from `path`, replacing the sandbox collection
///
/// The collection is cleared only after the file opens, so a missing or
/// unreadable file leaves in-memory state untouched. A malformed record
/// aborts the remaining load; records parsed before it stay in the sandbox
/// alongside the returned error.
pub fn load<P: AsRef<Path>>(path: P, sandbox: &mut Sandbox) -> Result<usize, StoreError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| {
        log::warn!("failed to open {}: {}", path.display(), err);
        StoreError::Io(err)
    })?;
    let reader = BufReader::new(file);

    sandbox.clear();
    let mut count = 0;
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if index == 0 {
            // Header line
            continue;
        }
        let object = parse_record(&line).map_err(|message| StoreError::Parse {
            line: index + 1,
            message,
        })?;
        sandbox.sim_mut().add_object(object);
        count += 1;
    }

    log::info!("loaded {} objects from {}", count, path.display());
    Ok(count)
}
