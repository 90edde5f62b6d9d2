//! SVG drawing of a laid-out [Molecule].

use log::{debug, warn};

use super::{coords::BOND_LENGTH, BondOrder, Molecule, Point};
use crate::config::DrawOptions;

/// size of sub- and superscripts relative to the label font
const SCRIPT_SCALE: f64 = 0.7;

/// rough advance width of a label character relative to the font size
const CHAR_WIDTH: f64 = 0.6;

/// fraction of its length cut from each end of an inner double bond line
const INNER_INSET: f64 = 0.15;

fn escape(text: &str) -> String {
    let mut ret = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => ret.push_str("&amp;"),
            '<' => ret.push_str("&lt;"),
            '>' => ret.push_str("&gt;"),
            '\'' => ret.push_str("&apos;"),
            '"' => ret.push_str("&quot;"),
            c => ret.push(c),
        }
    }
    ret
}

fn charge_label(charge: i8) -> String {
    let sign = if charge > 0 { '+' } else { '-' };
    match charge.unsigned_abs() {
        1 => sign.to_string(),
        n => format!("{n}{sign}"),
    }
}

/// heteroatoms, charged or labelled carbons, and isolated atoms get a text
/// label. every other carbon is an unlabelled line vertex
fn needs_label(mol: &Molecule, atom: usize) -> bool {
    let a = &mol.atoms()[atom];
    a.element != 6
        || a.charge != 0
        || a.isotope.is_some()
        || mol.neighbors(atom).is_empty()
}

/// maps layout coordinates onto the canvas, flipping y
struct Transform {
    center: Point,
    scale: f64,
    canvas_center: Point,
}

impl Transform {
    fn fit(coords: &[Point], width: f64, height: f64, opts: &DrawOptions) -> Self {
        let (mut min, mut max) = (coords[0], coords[0]);
        for p in coords {
            min = Point::new(min.x.min(p.x), min.y.min(p.y));
            max = Point::new(max.x.max(p.x), max.y.max(p.y));
        }
        // room for the labels of the outermost atoms
        let margin = Point::new(0.5 * BOND_LENGTH, 0.5 * BOND_LENGTH);
        min -= margin;
        max += margin;

        let avail_w = width * (1.0 - 2.0 * opts.padding);
        let avail_h = height * (1.0 - 2.0 * opts.padding);
        let scale = (avail_w / (max.x - min.x))
            .min(avail_h / (max.y - min.y))
            .min(opts.max_bond_length / BOND_LENGTH)
            .max(0.0);
        Self {
            center: min.midpoint(max),
            scale,
            canvas_center: Point::new(width / 2.0, height / 2.0),
        }
    }

    fn apply(&self, p: Point) -> Point {
        let d = p - self.center;
        self.canvas_center + Point::new(d.x * self.scale, -d.y * self.scale)
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Script {
    Normal,
    Sub,
    Super,
}

/// Accumulates an SVG document. Create it with [MolDraw2DSvg::new], add a
/// molecule with [MolDraw2DSvg::draw_molecule], close it with
/// [MolDraw2DSvg::finish_drawing] and take the text with
/// [MolDraw2DSvg::into_text].
pub struct MolDraw2DSvg<'a> {
    width: u32,
    height: u32,
    opts: &'a DrawOptions,
    text: String,
    finished: bool,
}

impl<'a> MolDraw2DSvg<'a> {
    pub fn new(width: u32, height: u32, opts: &'a DrawOptions) -> Self {
        let mut text = String::new();
        text.push_str("<?xml version='1.0' encoding='utf-8'?>\n");
        text.push_str(&format!(
            "<svg xmlns='http://www.w3.org/2000/svg' version='1.1' \
             width='{width}px' height='{height}px' viewBox='0 0 {width} {height}'>\n"
        ));
        text.push_str(&format!(
            "<rect x='0' y='0' width='{width}' height='{height}' \
             style='fill:{};stroke:none' />\n",
            escape(&opts.background)
        ));
        Self {
            width,
            height,
            opts,
            text,
            finished: false,
        }
    }

    /// draw `mol` at `coords`, one point per atom, scaled to fit the canvas
    pub fn draw_molecule(&mut self, mol: &Molecule, coords: &[Point]) {
        if coords.is_empty() {
            return;
        }
        if coords.len() != mol.num_atoms() {
            warn!(
                "got {} coordinates for {} atoms, not drawing",
                coords.len(),
                mol.num_atoms()
            );
            return;
        }
        let t = Transform::fit(
            coords,
            self.width as f64,
            self.height as f64,
            self.opts,
        );
        let pos: Vec<Point> = coords.iter().map(|&p| t.apply(p)).collect();
        let bond_px = BOND_LENGTH * t.scale;
        let font_size = self.opts.font_scale * bond_px;
        debug!("drawing with {bond_px:.1}px bonds and {font_size:.1}px labels");

        let labelled: Vec<bool> =
            (0..mol.num_atoms()).map(|i| needs_label(mol, i)).collect();
        for idx in 0..mol.num_bonds() {
            self.draw_bond(mol, idx, &pos, &labelled, font_size, bond_px);
        }
        for i in (0..mol.num_atoms()).filter(|&i| labelled[i]) {
            self.draw_label(mol, i, &pos, font_size);
        }
    }

    fn atom_color(&self, mol: &Molecule, atom: usize) -> &'static str {
        if self.opts.color_atoms {
            mol.atoms()[atom].color()
        } else {
            "#000000"
        }
    }

    /// +1 or -1 for the side of `bond` facing the center of a ring it belongs
    /// to, or `None` outside rings
    fn ring_side(mol: &Molecule, bond: usize, pos: &[Point]) -> Option<f64> {
        let b = &mol.bonds()[bond];
        let ring = mol.rings().iter().find(|ring| {
            let n = ring.len();
            (0..n).any(|i| {
                let (x, y) = (ring[i], ring[(i + 1) % n]);
                (x, y) == (b.begin, b.end) || (y, x) == (b.begin, b.end)
            })
        })?;
        let center = Point::centroid(ring.iter().map(|&a| pos[a]));
        let (p1, p2) = (pos[b.begin], pos[b.end]);
        let normal = (p2 - p1).normalized().perp();
        let side = normal.dot(center - p1.midpoint(p2));
        Some(if side < 0.0 { -1.0 } else { 1.0 })
    }

    fn draw_bond(
        &mut self,
        mol: &Molecule,
        idx: usize,
        pos: &[Point],
        labelled: &[bool],
        font_size: f64,
        bond_px: f64,
    ) {
        let bond = &mol.bonds()[idx];
        let (a, b) = (bond.begin, bond.end);
        let (mut p1, mut p2) = (pos[a], pos[b]);
        let dir = (p2 - p1).normalized();
        let clearance = |atom: usize| {
            if labelled[atom] {
                0.55 * font_size
            } else {
                0.0
            }
        };
        let len = p1.distance(p2) - clearance(a) - clearance(b);
        if len <= 0.0 {
            return;
        }
        p1 += dir * clearance(a);
        p2 -= dir * clearance(b);

        let colors = (self.atom_color(mol, a), self.atom_color(mol, b));
        let offset = self.opts.multiple_bond_offset * bond_px;
        let normal = dir.perp();
        match bond.order {
            BondOrder::Single => self.line(p1, p2, colors),
            // aromatic bonds are gone after kekulization
            BondOrder::Double | BondOrder::Aromatic => {
                match Self::ring_side(mol, idx, pos) {
                    Some(side) => {
                        self.line(p1, p2, colors);
                        let shift = normal * (offset * side);
                        let inset = dir * (INNER_INSET * len);
                        self.line(p1 + shift + inset, p2 + shift - inset, colors);
                    }
                    None => {
                        let half = normal * (offset / 2.0);
                        self.line(p1 + half, p2 + half, colors);
                        self.line(p1 - half, p2 - half, colors);
                    }
                }
            }
            BondOrder::Triple => {
                let shift = normal * offset;
                self.line(p1, p2, colors);
                self.line(p1 + shift, p2 + shift, colors);
                self.line(p1 - shift, p2 - shift, colors);
            }
            BondOrder::Quadruple => {
                for k in [-1.5, -0.5, 0.5, 1.5] {
                    let shift = normal * (offset * k);
                    self.line(p1 + shift, p2 + shift, colors);
                }
            }
        }
    }

    /// a bond line, split in the middle when its ends have different colours
    fn line(&mut self, a: Point, b: Point, colors: (&str, &str)) {
        if colors.0 == colors.1 {
            self.path(a, b, colors.0);
        } else {
            let mid = a.midpoint(b);
            self.path(a, mid, colors.0);
            self.path(mid, b, colors.1);
        }
    }

    fn path(&mut self, a: Point, b: Point, color: &str) {
        self.text.push_str(&format!(
            "<path d='M {:.1},{:.1} L {:.1},{:.1}' \
             style='fill:none;stroke:{color};stroke-width:{:.1}px;\
             stroke-linecap:round' />\n",
            a.x, a.y, b.x, b.y, self.opts.line_width
        ));
    }

    fn draw_label(&mut self, mol: &Molecule, i: usize, pos: &[Point], font_size: f64) {
        let atom = &mol.atoms()[i];
        let p = pos[i];

        let mut hydrogens = Vec::new();
        if atom.hydrogens > 0 {
            hydrogens.push(("H".to_owned(), Script::Normal));
            if atom.hydrogens > 1 {
                hydrogens.push((atom.hydrogens.to_string(), Script::Sub));
            }
        }
        // hydrogens go on the side away from the bonds
        let dx: f64 = mol.neighbors(i).iter().map(|&(n, _)| pos[n].x - p.x).sum();
        let h_left = dx > 1e-6;

        let mut pieces = Vec::new();
        if h_left {
            pieces.append(&mut hydrogens);
        }
        if let Some(iso) = atom.isotope {
            pieces.push((iso.to_string(), Script::Super));
        }
        let symbol_at = pieces.len();
        pieces.push((atom.symbol().to_owned(), Script::Normal));
        pieces.append(&mut hydrogens);
        if atom.charge != 0 {
            pieces.push((charge_label(atom.charge), Script::Super));
        }

        let small = font_size * SCRIPT_SCALE;
        let width = |(text, script): &(String, Script)| {
            let size = if *script == Script::Normal { font_size } else { small };
            CHAR_WIDTH * size * text.chars().count() as f64
        };
        let before: f64 = pieces[..symbol_at].iter().map(width).sum();
        let x = p.x - before - width(&pieces[symbol_at]) / 2.0;
        let y = p.y + 0.35 * font_size;

        let color = self.atom_color(mol, i);
        let mut body = String::new();
        for (text, script) in &pieces {
            let text = escape(text);
            match script {
                Script::Normal => body.push_str(&text),
                Script::Sub | Script::Super => {
                    let shift = if *script == Script::Sub { "sub" } else { "super" };
                    body.push_str(&format!(
                        "<tspan baseline-shift='{shift}' font-size='{small:.1}px'>\
                         {text}</tspan>"
                    ));
                }
            }
        }
        self.text.push_str(&format!(
            "<text x='{x:.1}' y='{y:.1}' font-family='{}' font-size='{font_size:.1}px' \
             fill='{color}'>{body}</text>\n",
            escape(&self.opts.font_family)
        ));
    }

    /// close the document. further drawing calls have no visible effect
    pub fn finish_drawing(&mut self) {
        if !self.finished {
            self.text.push_str("</svg>\n");
            self.finished = true;
        }
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn svg(smiles: &str, opts: &DrawOptions) -> String {
        let mut mol = Molecule::from_smiles(smiles).unwrap();
        mol.compute_2d_coords();
        mol.draw_svg(400, 300, opts)
    }

    #[test]
    fn document_structure() {
        let text = svg("CCO", &DrawOptions::default());
        assert!(text.starts_with("<?xml version='1.0' encoding='utf-8'?>\n<svg"));
        assert!(text.contains("width='400px' height='300px' viewBox='0 0 400 300'"));
        assert!(text.ends_with("</svg>\n"));
        assert_eq!(text.matches("</svg>").count(), 1);
        assert!(text.contains(">OH</text>") || text.contains(">HO</text>"));
        // one half-bond split at the C-O bond
        assert_eq!(text.matches("<path").count(), 3);
        assert!(text.contains("stroke:#FF0000"));
    }

    #[test]
    fn benzene_inner_lines() {
        let text = svg("c1ccccc1", &DrawOptions::default());
        assert_eq!(text.matches("<path").count(), 9);
        assert!(!text.contains("<text"));
    }

    #[test]
    fn monochrome() {
        let opts = DrawOptions {
            color_atoms: false,
            ..DrawOptions::default()
        };
        let text = svg("CC(=O)O", &opts);
        assert!(!text.contains("#FF0000"));
    }

    #[test]
    fn charges_and_isotopes() {
        let text = svg("[NH4+]", &DrawOptions::default());
        assert!(text.contains(">NH<tspan baseline-shift='sub'"));
        assert!(text.contains(">4</tspan>"));
        assert!(text.contains(">+</tspan>"));

        let text = svg("[13CH4]", &DrawOptions::default());
        assert!(text.contains(">13</tspan>CH<tspan"));

        let text = svg("[O-2]", &DrawOptions::default());
        assert!(text.contains(">2-</tspan>"));
    }

    #[test]
    fn options_are_escaped() {
        let opts = DrawOptions {
            font_family: "Comic 'Sans'".to_owned(),
            ..DrawOptions::default()
        };
        let text = svg("O", &opts);
        assert!(text.contains("font-family='Comic &apos;Sans&apos;'"));
    }

    #[test]
    fn atoms_stay_on_canvas() {
        let mut mol = Molecule::from_smiles("CCCCCCCCCCCCCCCCCCCC").unwrap();
        mol.compute_2d_coords();
        let opts = DrawOptions::default();
        let t = Transform::fit(mol.coords(), 400.0, 300.0, &opts);
        for &p in mol.coords() {
            let q = t.apply(p);
            assert!((0.0..=400.0).contains(&q.x));
            assert!((0.0..=300.0).contains(&q.y));
        }
    }
}
