//! Text scene descriptions.
//!
//! A scene file is a flat list of stanzas, one shape or light per stanza,
//! with `#` line comments:
//!
//! ```text
//! light (2, 3, 0)
//! sphere (0, 0, -5) 1 color red
//! sphere (1.1, -0.9, -4.2) 0.6 color (0.9, 0.4, 0.5) refract 1.1
//! plane (0, -1.5, 0) (0, 1, 0) color white reflect (0.15, 0.15, 0.15)
//! mesh "bunny.obj" color (0.8, 0.8, 0.8) > scale 1.5 > translate (0, -0.5, -5.5)
//! ```
//!
//! A material starts at `color` and takes optional trailing properties in any
//! order: `ambient`, `specular`, `shininess`, `reflect`, `refract`. Shapes
//! are numbered by position in the file, which keeps ids unique. The light
//! defaults to `(2, 3, 0)` when no `light` stanza appears; a later stanza
//! replaces an earlier one.

use std::fmt;

use super::core::{Material, Scene, Shape};
use super::math::{Mat4, Vec3};
use super::model::TriangleMesh;

#[derive(Debug, Clone, Copy)]
struct FilePosition {
    line: u32,
    column: u32,
    index: usize,
}

impl FilePosition {
    fn start() -> FilePosition {
        FilePosition {
            line: 0,
            column: 0,
            index: 0,
        }
    }

    fn advance_over(&mut self, c: char) {
        self.index += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }
}

#[derive(Debug)]
pub struct ParserError {
    position: FilePosition,
    pub message: String,
}

impl ParserError {
    fn new(message: String, position: FilePosition) -> ParserError {
        ParserError { position, message }
    }

    /// Echo the offending line with a caret under the error column.
    pub fn print_error_location(&self, content: &str) {
        eprintln!("{}", self);
        if let Some(line) = content.lines().nth(self.position.line as usize) {
            eprintln!("{}", line);
            eprintln!("{}^", " ".repeat(self.position.column as usize));
        }
    }
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} at {}:{}",
            self.message, self.position.line, self.position.column
        )
    }
}

impl std::error::Error for ParserError {}

type ParserResult<T> = Result<T, ParserError>;

pub struct SceneParser<'a> {
    content: &'a str,
    position: FilePosition,
    // a token read by peek but not yet consumed
    pending: Option<String>,
}

impl<'a> SceneParser<'a> {
    pub fn new(content: &'a str) -> SceneParser<'a> {
        SceneParser {
            content,
            position: FilePosition::start(),
            pending: None,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.content[self.position.index..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.current_char() {
            self.position.advance_over(c);
        }
    }

    fn eat_spaces(&mut self) {
        while let Some(c) = self.current_char() {
            if c == '#' {
                while self.current_char().is_some_and(|c| c != '\n') {
                    self.advance();
                }
            } else if !c.is_whitespace() {
                break;
            }
            self.advance();
        }
    }

    fn take_while(&mut self, token: &mut String, keep: impl Fn(char) -> bool) {
        while let Some(c) = self.current_char() {
            if !keep(c) {
                break;
            }
            token.push(c);
            self.advance();
        }
    }

    /// Consume the next token: a symbol, a quoted string, a number or a word.
    /// The empty string stands for the end of input.
    fn pop(&mut self) -> String {
        if let Some(token) = self.pending.take() {
            return token;
        }

        self.eat_spaces();
        let mut token = String::new();
        let Some(c) = self.current_char() else {
            return token;
        };
        match c {
            '(' | ')' | ',' | '>' => {
                token.push(c);
                self.advance();
            }
            '"' => {
                token.push(c);
                self.advance();
                self.take_while(&mut token, |c| c != '"');
                if self.current_char() == Some('"') {
                    token.push('"');
                    self.advance();
                }
            }
            '+' | '-' | '.' | '0'..='9' => {
                token.push(c);
                self.advance();
                self.take_while(&mut token, |c| c.is_ascii_digit() || c == '.');
            }
            _ => {
                self.take_while(&mut token, |c| c.is_alphabetic() || c == '_');
                if token.is_empty() {
                    // an unrecognized symbol still has to come out as a token,
                    // otherwise the parser would spin on it
                    token.push(c);
                    self.advance();
                }
            }
        }
        token
    }

    fn peek(&mut self) -> &str {
        if self.pending.is_none() {
            self.pending = Some(self.pop());
        }
        self.pending.as_deref().unwrap()
    }

    fn error<T>(&self, message: String) -> ParserResult<T> {
        Err(ParserError::new(message, self.position))
    }

    fn at_end(&mut self) -> bool {
        self.peek().is_empty()
    }

    fn match_token(&mut self, expected: &str) -> ParserResult<()> {
        let token = self.pop();
        if token != expected {
            return self.error(format!("expected '{}', got '{}'", expected, token));
        }
        Ok(())
    }

    /// Consume the token if it is the expected one, leave the stream alone
    /// otherwise.
    fn maybe_match(&mut self, expected: &str) -> bool {
        if self.peek() == expected {
            self.pop();
            return true;
        }
        false
    }

    fn parse_float(&mut self) -> ParserResult<f64> {
        let token = self.pop();
        match token.parse::<f64>() {
            Ok(number) => Ok(number),
            Err(..) => self.error(format!("cannot read '{}' as a number", token)),
        }
    }

    fn parse_vec3(&mut self) -> ParserResult<Vec3> {
        self.match_token("(")?;
        let x = self.parse_float()?;
        self.match_token(",")?;
        let y = self.parse_float()?;
        self.match_token(",")?;
        let z = self.parse_float()?;
        self.match_token(")")?;
        Ok(Vec3::new(x, y, z))
    }

    fn parse_color(&mut self) -> ParserResult<Vec3> {
        let named = [
            ("red", Vec3::new(1.0, 0.0, 0.0)),
            ("green", Vec3::new(0.0, 1.0, 0.0)),
            ("blue", Vec3::new(0.0, 0.0, 1.0)),
            ("white", Vec3::new(1.0, 1.0, 1.0)),
            ("black", Vec3::new(0.0, 0.0, 0.0)),
            ("yellow", Vec3::new(1.0, 1.0, 0.0)),
            ("orange", Vec3::new(0.98, 0.45, 0.02)),
            ("grey", Vec3::new(0.6, 0.6, 0.6)),
        ];
        for (name, value) in named {
            if self.maybe_match(name) {
                return Ok(value);
            }
        }
        self.parse_vec3()
    }

    fn parse_string(&mut self) -> ParserResult<String> {
        let token = self.pop();
        let unquoted = token
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'));
        match unquoted {
            Some(inner) => Ok(inner.to_string()),
            None => self.error(format!("expected a quoted string, got '{}'", token)),
        }
    }

    fn parse_material(&mut self) -> ParserResult<Material> {
        self.match_token("color")?;
        let mut material = Material::matte(self.parse_color()?);
        loop {
            if self.maybe_match("ambient") {
                material.ambient = self.parse_color()?;
            } else if self.maybe_match("specular") {
                material.specular = self.parse_color()?;
            } else if self.maybe_match("shininess") {
                material.shininess = self.parse_float()?;
            } else if self.maybe_match("reflect") {
                material.reflection_strength = self.parse_color()?;
            } else if self.maybe_match("refract") {
                material.index_of_refraction = self.parse_float()?;
            } else {
                break;
            }
        }
        Ok(material)
    }

    fn parse_sphere(&mut self, id: i32) -> ParserResult<Shape> {
        self.match_token("sphere")?;
        let centre = self.parse_vec3()?;
        let radius = self.parse_float()?;
        let material = self.parse_material()?;
        Ok(Shape::sphere(centre, radius, id, material))
    }

    fn parse_plane(&mut self, id: i32) -> ParserResult<Shape> {
        self.match_token("plane")?;
        let point = self.parse_vec3()?;
        let normal = self.parse_vec3()?;
        let material = self.parse_material()?;
        Ok(Shape::plane(point, normal, id, material))
    }

    /// A `>`-chain of placement steps, applied left to right.
    fn parse_placement(&mut self) -> ParserResult<Mat4> {
        let mut placement = Mat4::identity();
        while self.maybe_match(">") {
            let step = if self.maybe_match("scale") {
                Mat4::scale(self.parse_float()?)
            } else if self.maybe_match("translate") {
                Mat4::translate(self.parse_vec3()?)
            } else if self.maybe_match("rotate") {
                let axis = self.parse_vec3()?;
                let angle = self.parse_float()?;
                Mat4::rotate(axis, angle.to_radians())
            } else {
                let token = self.pop();
                return self.error(format!("unknown placement step '{}'", token));
            };
            placement = placement.then(&step);
        }
        Ok(placement)
    }

    fn parse_mesh(&mut self, id: i32) -> ParserResult<Shape> {
        self.match_token("mesh")?;
        let path = self.parse_string()?;
        let material = self.parse_material()?;
        let placement = self.parse_placement()?;
        let mesh = match TriangleMesh::from_obj(&path, &placement) {
            Ok(mesh) => mesh,
            Err(error) => return self.error(format!("cannot load mesh '{}': {}", path, error)),
        };
        Ok(Shape::mesh(mesh, id, material))
    }

    fn parse_light(&mut self) -> ParserResult<Vec3> {
        self.match_token("light")?;
        self.parse_vec3()
    }

    /// Parse the whole file into a scene.
    pub fn parse_scene(&mut self) -> ParserResult<Scene> {
        let mut shapes = Vec::new();
        let mut light_position = Vec3::new(2.0, 3.0, 0.0);
        while !self.at_end() {
            let id = shapes.len() as i32;
            let next = self.peek().to_string();
            match next.as_str() {
                "light" => light_position = self.parse_light()?,
                "sphere" => shapes.push(self.parse_sphere(id)?),
                "plane" => shapes.push(self.parse_plane(id)?),
                "mesh" => shapes.push(self.parse_mesh(id)?),
                _ => return self.error(format!("unexpected token '{}'", next)),
            }
        }
        Ok(Scene {
            shapes,
            light_position,
        })
    }
}
