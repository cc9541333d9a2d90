//! Scene file reader.
//!
//! A single pass over the input bytes, one character at a time, for the
//! small JSON-like grammar scene files use:
//!
//! ```text
//! scene  := '[' (object (',' object)*)? ']'
//! object := '{' '"type"' ':' string (',' field)* '}'
//! field  := string ':' (number | vector)
//! vector := '[' number ',' number ',' number ']'
//! ```
//!
//! Whitespace is allowed between any two tokens. Strings are plain printable
//! ASCII without escapes. Every error carries the line the reader stopped on.

use crate::{
    algebra::Vec3,
    cylinder::Cylinder,
    error::ParseError,
    object::{ObjectKind, SceneObject},
    plane::Plane,
    scene::{Camera, Scene},
    sphere::Sphere,
};

/// Longest string the reader accepts, in bytes.
pub const MAX_STRING_LEN: usize = 128;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Skip unknown fields with a warning instead of failing.
    pub lenient: bool,
}

/// Parse a scene with the default (strict) options.
pub fn parse_scene(input: &[u8]) -> Result<Scene, ParseError> {
    parse_scene_with(input, ParseOptions::default())
}

pub fn parse_scene_with(input: &[u8], options: ParseOptions) -> Result<Scene, ParseError> {
    SceneReader {
        cursor: Cursor::new(input),
        options,
        objects: Vec::new(),
        camera_seen: false,
    }
    .read()
}

/// Byte cursor that keeps the line count.
struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
    line: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0, line: 1 }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Consume one byte; running out is an error.
    fn next(&mut self) -> Result<u8, ParseError> {
        let ch = self
            .peek()
            .ok_or(ParseError::UnexpectedEof { line: self.line })?;
        self.pos += 1;
        if ch == b'\n' {
            self.line += 1;
        }
        Ok(ch)
    }

    fn expect(&mut self, want: u8, expected: &'static str) -> Result<(), ParseError> {
        let ch = self.next()?;
        if ch == want {
            Ok(())
        } else {
            Err(self.syntax(expected, ch))
        }
    }

    fn skip_ws(&mut self) {
        while let Some(ch @ (b' ' | b'\t' | b'\n' | b'\r')) = self.peek() {
            self.pos += 1;
            if ch == b'\n' {
                self.line += 1;
            }
        }
    }

    fn syntax(&self, expected: &'static str, found: u8) -> ParseError {
        ParseError::Syntax {
            expected,
            found: describe(found),
            line: self.line,
        }
    }

    fn string(&mut self) -> Result<String, ParseError> {
        let open = self.next()?;
        if open != b'"' {
            return Err(self.syntax("string", open));
        }

        let mut out = String::new();
        loop {
            let ch = self.next()?;
            if ch == b'"' {
                return Ok(out);
            }
            if out.len() >= MAX_STRING_LEN {
                return Err(ParseError::StringTooLong { line: self.line });
            }
            if ch == b'\\' || !(32..=126).contains(&ch) {
                return Err(ParseError::UnsupportedStringContent {
                    found: describe(ch),
                    line: self.line,
                });
            }
            out.push(char::from(ch));
        }
    }

    /// Fails if the input is exhausted in the middle of a token.
    fn more(&self) -> Result<(), ParseError> {
        match self.peek() {
            Some(_) => Ok(()),
            None => Err(ParseError::UnexpectedEof { line: self.line }),
        }
    }

    fn digits(&mut self) -> usize {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        self.pos - start
    }

    fn number(&mut self) -> Result<f64, ParseError> {
        let start = self.pos;
        let first = self
            .peek()
            .ok_or(ParseError::UnexpectedEof { line: self.line })?;

        if matches!(first, b'+' | b'-') {
            self.pos += 1;
        }
        let mut mantissa = self.digits();
        if self.peek() == Some(b'.') {
            self.pos += 1;
            mantissa += self.digits();
        }
        if mantissa == 0 {
            self.more()?;
            self.pos = start;
            return Err(self.syntax("number", first));
        }

        let mut exponent_ok = true;
        if let Some(b'e' | b'E') = self.peek() {
            self.pos += 1;
            self.more()?;
            if let Some(b'+' | b'-') = self.peek() {
                self.pos += 1;
                self.more()?;
            }
            exponent_ok = self.digits() > 0;
        }

        let text = String::from_utf8_lossy(&self.input[start..self.pos]).into_owned();
        match text.parse::<f64>() {
            Ok(value) if exponent_ok && value.is_finite() => Ok(value),
            _ => Err(ParseError::InvalidNumber { text, line: self.line }),
        }
    }

    fn vector(&mut self) -> Result<Vec3, ParseError> {
        self.expect(b'[', "'['")?;
        let mut v = [0.0; 3];
        for (i, slot) in v.iter_mut().enumerate() {
            self.skip_ws();
            *slot = self.number()?;
            self.skip_ws();
            if i < 2 {
                self.expect(b',', "','")?;
            }
        }
        self.expect(b']', "']'")?;
        Ok(v.into())
    }
}

/// Human readable form of a byte for diagnostics.
fn describe(ch: u8) -> String {
    if (32..=126).contains(&ch) {
        format!("'{}'", char::from(ch))
    } else {
        format!("byte 0x{ch:02x}")
    }
}

/// Properties a scene object may carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    Width,
    Height,
    Radius,
    Color,
    Position,
    Normal,
}

impl Field {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "width" => Some(Self::Width),
            "height" => Some(Self::Height),
            "radius" => Some(Self::Radius),
            "color" => Some(Self::Color),
            "position" => Some(Self::Position),
            "normal" => Some(Self::Normal),
            _ => None,
        }
    }

    fn applies_to(self, kind: ObjectKind) -> bool {
        use Field::*;
        match kind {
            ObjectKind::Camera => matches!(self, Width | Height),
            ObjectKind::Sphere | ObjectKind::Cylinder => matches!(self, Radius | Color | Position),
            ObjectKind::Plane => matches!(self, Color | Position | Normal),
        }
    }
}

/// Fields collected for the object currently open.
#[derive(Debug)]
struct ObjectBuilder {
    kind: ObjectKind,
    width: Option<f64>,
    height: Option<f64>,
    radius: Option<f64>,
    color: Option<Vec3>,
    position: Option<Vec3>,
    normal: Option<Vec3>,
}

impl ObjectBuilder {
    fn new(kind: ObjectKind) -> Self {
        Self {
            kind,
            width: None,
            height: None,
            radius: None,
            color: None,
            position: None,
            normal: None,
        }
    }

    fn finish(self, line: usize) -> Result<SceneObject, ParseError> {
        let kind = self.kind;
        let require = |value: Option<f64>, field: &'static str| {
            value.ok_or(ParseError::MissingField { field, kind, line })
        };
        let positive = |value: f64, field: &'static str| {
            if value > 0.0 {
                Ok(value)
            } else {
                Err(ParseError::InvalidValue { field, reason: "must be positive", line })
            }
        };

        let color = self.color.unwrap_or(Vec3::ZERO);
        let center = self.position.unwrap_or(Vec3::ZERO);

        Ok(match kind {
            ObjectKind::Camera => SceneObject::Camera(Camera {
                width: positive(require(self.width, "width")?, "width")?,
                height: positive(require(self.height, "height")?, "height")?,
            }),
            ObjectKind::Sphere => SceneObject::Sphere(Sphere {
                center,
                radius: positive(require(self.radius, "radius")?, "radius")?,
                color,
            }),
            ObjectKind::Cylinder => SceneObject::Cylinder(Cylinder {
                center,
                radius: positive(require(self.radius, "radius")?, "radius")?,
                color,
            }),
            ObjectKind::Plane => {
                let normal = self
                    .normal
                    .ok_or(ParseError::MissingField { field: "normal", kind, line })?;
                let plane = Plane::new(center, normal, color)
                    .map_err(|_| ParseError::DegenerateVector { field: "normal", line })?;
                SceneObject::Plane(plane)
            }
        })
    }
}

struct SceneReader<'a> {
    cursor: Cursor<'a>,
    options: ParseOptions,
    objects: Vec<SceneObject>,
    camera_seen: bool,
}

impl<'a> SceneReader<'a> {
    fn read(mut self) -> Result<Scene, ParseError> {
        self.cursor.skip_ws();
        self.cursor.expect(b'[', "'['")?;
        self.cursor.skip_ws();

        if self.cursor.peek() == Some(b']') {
            self.cursor.next()?;
        } else {
            loop {
                self.read_object()?;
                self.cursor.skip_ws();
                match self.cursor.next()? {
                    b',' => self.cursor.skip_ws(),
                    b']' => break,
                    other => return Err(self.cursor.syntax("',' or ']'", other)),
                }
            }
        }

        self.cursor.skip_ws();
        if let Some(trailing) = self.cursor.peek() {
            return Err(self.cursor.syntax("end of input", trailing));
        }
        if !self.objects.is_empty() && !self.camera_seen {
            return Err(ParseError::MissingCamera { line: self.cursor.line });
        }

        tracing::debug!(objects = self.objects.len(), lines = self.cursor.line, "scene parsed");
        Ok(Scene::from_objects(self.objects))
    }

    fn read_object(&mut self) -> Result<(), ParseError> {
        let cursor = &mut self.cursor;
        cursor.expect(b'{', "'{'")?;
        cursor.skip_ws();

        let line = cursor.line;
        let key = cursor.string()?;
        if key != "type" {
            return Err(ParseError::Syntax {
                expected: "\"type\" key",
                found: format!("\"{key}\""),
                line,
            });
        }
        cursor.skip_ws();
        cursor.expect(b':', "':'")?;
        cursor.skip_ws();

        let line = cursor.line;
        let value = cursor.string()?;
        let kind = ObjectKind::from_name(&value)
            .ok_or(ParseError::UnknownObjectType { value, line })?;
        if kind == ObjectKind::Camera && self.camera_seen {
            return Err(ParseError::DuplicateCamera { line });
        }

        let mut builder = ObjectBuilder::new(kind);
        loop {
            self.cursor.skip_ws();
            match self.cursor.next()? {
                b'}' => break,
                b',' => {
                    self.cursor.skip_ws();
                    self.read_field(&mut builder)?;
                }
                other => return Err(self.cursor.syntax("',' or '}'", other)),
            }
        }

        let object = builder.finish(self.cursor.line)?;
        tracing::debug!(line = self.cursor.line, %kind, "parsed scene object");

        self.camera_seen |= kind == ObjectKind::Camera;
        self.objects.push(object);
        Ok(())
    }

    fn read_field(&mut self, builder: &mut ObjectBuilder) -> Result<(), ParseError> {
        let line = self.cursor.line;
        let key = self.cursor.string()?;
        self.cursor.skip_ws();
        self.cursor.expect(b':', "':'")?;
        self.cursor.skip_ws();

        let Some(field) = Field::from_key(&key) else {
            if self.options.lenient {
                tracing::warn!(line, key = %key, "skipping unknown field");
                return self.skip_value();
            }
            return Err(ParseError::UnknownField { key, line });
        };

        let kind = builder.kind;
        match field {
            Field::Width => builder.width = Some(self.decode(field, kind, key, line, Cursor::number)?),
            Field::Height => builder.height = Some(self.decode(field, kind, key, line, Cursor::number)?),
            Field::Radius => builder.radius = Some(self.decode(field, kind, key, line, Cursor::number)?),
            Field::Color => builder.color = Some(self.decode(field, kind, key, line, Cursor::vector)?),
            Field::Position => builder.position = Some(self.decode(field, kind, key, line, Cursor::vector)?),
            Field::Normal => builder.normal = Some(self.decode(field, kind, key, line, Cursor::vector)?),
        }
        Ok(())
    }

    /// Read a field's value, then check the open object has such a field.
    fn decode<T>(
        &mut self,
        field: Field,
        kind: ObjectKind,
        key: String,
        line: usize,
        read: fn(&mut Cursor<'a>) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        let value = read(&mut self.cursor)?;
        if !field.applies_to(kind) {
            return Err(ParseError::FieldNotApplicable { key, kind, line });
        }
        Ok(value)
    }

    /// Consume a value of whatever shape follows, for lenient mode.
    fn skip_value(&mut self) -> Result<(), ParseError> {
        match self.cursor.peek() {
            Some(b'[') => self.cursor.vector().map(drop),
            Some(b'"') => self.cursor.string().map(drop),
            _ => self.cursor.number().map(drop),
        }
    }
}
