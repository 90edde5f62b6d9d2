//! 2D coordinate generation. Ring systems are laid out as regular polygons
//! fused edge to edge, everything else is grown outward from the first atom
//! placed, one breadth-first shell at a time.

use std::cmp::Reverse;
use std::collections::VecDeque;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_6, PI, TAU};

use log::{debug, trace};

use super::{BondOrder, Molecule, Point};

/// nominal bond length in layout units
pub(crate) const BOND_LENGTH: f64 = 1.5;

/// horizontal space left between disconnected components
const COMPONENT_GAP: f64 = 2.0 * BOND_LENGTH;

/// non-bonded atoms closer than this count as overlapping
const CLASH_DISTANCE: f64 = 0.5 * BOND_LENGTH;

const RELAX_STEPS: usize = 1000;

/// largest distance an atom moves in one relaxation step
const MAX_MOVE: f64 = 0.3 * BOND_LENGTH;

/// spreads the push directions of coincident atoms
const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

/// connected components, each listed in ascending atom order
fn components(mol: &Molecule) -> Vec<Vec<usize>> {
    let mut seen = vec![false; mol.num_atoms()];
    let mut ret = Vec::new();
    for start in 0..mol.num_atoms() {
        if seen[start] {
            continue;
        }
        seen[start] = true;
        let mut comp = vec![start];
        let mut stack = vec![start];
        while let Some(a) = stack.pop() {
            for &(n, _) in mol.neighbors(a) {
                if !seen[n] {
                    seen[n] = true;
                    comp.push(n);
                    stack.push(n);
                }
            }
        }
        comp.sort_unstable();
        ret.push(comp);
    }
    ret
}

/// rotate `points` about their centroid so that their long axis lies along x
fn orient(points: &mut [Point]) {
    if points.len() < 2 {
        return;
    }
    let c = Point::centroid(points.iter().copied());
    let (mut xx, mut yy, mut xy) = (0.0, 0.0, 0.0);
    for p in points.iter() {
        let d = *p - c;
        xx += d.x * d.x;
        yy += d.y * d.y;
        xy += d.x * d.y;
    }
    // no preferred axis, e.g. a lone regular ring
    let scale = (xx + yy).max(f64::EPSILON);
    if (xx - yy).abs() < 1e-6 * scale && xy.abs() < 1e-6 * scale {
        return;
    }
    let angle = 0.5 * (2.0 * xy).atan2(xx - yy);
    for p in points.iter_mut() {
        *p = c + (*p - c).rotated(-angle);
    }
}

pub(crate) fn layout(mol: &Molecule) -> Vec<Point> {
    let components = components(mol);
    debug!(
        "laying out {} atoms in {} component(s)",
        mol.num_atoms(),
        components.len()
    );

    let mut sketcher = Sketcher::new(mol);
    let mut coords = vec![Point::ORIGIN; mol.num_atoms()];
    let mut cursor = 0.0;
    for comp in &components {
        sketcher.place_component(comp);
        let mut points: Vec<Point> = comp
            .iter()
            .map(|&a| sketcher.coords[a].unwrap_or_default())
            .collect();
        let bonds = component_bonds(mol, comp);
        if has_defects(&bonds, &points) {
            relax(&bonds, &mut points);
        }
        orient(&mut points);

        let (mut min, mut max) = (points[0], points[0]);
        for p in &points {
            min = Point::new(min.x.min(p.x), min.y.min(p.y));
            max = Point::new(max.x.max(p.x), max.y.max(p.y));
        }
        let shift = Point::new(cursor - min.x, -0.5 * (min.y + max.y));
        for (&a, p) in comp.iter().zip(points) {
            coords[a] = p + shift;
        }
        cursor += max.x - min.x + COMPONENT_GAP;
    }
    coords
}

/// bonds inside `comp` as pairs of indices into `comp`
fn component_bonds(mol: &Molecule, comp: &[usize]) -> Vec<(usize, usize)> {
    let mut ret = Vec::new();
    for (i, &a) in comp.iter().enumerate() {
        for &(n, _) in mol.neighbors(a) {
            if n > a {
                if let Ok(j) = comp.binary_search(&n) {
                    ret.push((i, j));
                }
            }
        }
    }
    ret
}

/// whether the constructive layout left a badly stretched bond or two atoms
/// on top of each other, as it does for cages like adamantane and cubane
fn has_defects(bonds: &[(usize, usize)], points: &[Point]) -> bool {
    let stretched = bonds.iter().any(|&(i, j)| {
        let len = points[i].distance(points[j]);
        !(0.75 * BOND_LENGTH..=1.25 * BOND_LENGTH).contains(&len)
    });
    stretched
        || (0..points.len()).any(|i| {
            (0..i).any(|j| points[i].distance(points[j]) < CLASH_DISTANCE)
        })
}

/// spring relaxation: bonds pull toward [BOND_LENGTH] and non-bonded atoms
/// closer than that push apart
fn relax(bonds: &[(usize, usize)], points: &mut [Point]) {
    let n = points.len();
    let mut bonded = vec![false; n * n];
    for &(i, j) in bonds {
        bonded[i * n + j] = true;
        bonded[j * n + i] = true;
    }
    let mut steps = 0;
    while steps < RELAX_STEPS {
        steps += 1;
        let mut forces = vec![Point::ORIGIN; n];
        for i in 0..n {
            for j in 0..i {
                let d = points[i] - points[j];
                let len = d.length();
                if !bonded[i * n + j] && len >= BOND_LENGTH {
                    continue;
                }
                let dir = if len < 1e-9 {
                    Point::from_angle(GOLDEN_ANGLE * (i * n + j) as f64)
                } else {
                    d * (1.0 / len)
                };
                let f = dir * (0.5 * (BOND_LENGTH - len));
                forces[i] += f;
                forces[j] -= f;
            }
        }
        let mut largest: f64 = 0.0;
        for (p, f) in points.iter_mut().zip(&forces) {
            let len = f.length();
            largest = largest.max(len);
            let step = (0.5 * len).min(MAX_MOVE);
            if len > 0.0 {
                *p += *f * (step / len);
            }
        }
        if largest < 1e-4 {
            break;
        }
    }
    debug!("relaxed {n} atoms in {steps} steps");
}

struct Sketcher<'a> {
    mol: &'a Molecule,
    coords: Vec<Option<Point>>,
    /// indices of the rings containing each atom
    atom_rings: Vec<Vec<usize>>,
    ring_done: Vec<bool>,
    /// placed atoms whose substituents have not been placed yet
    queue: VecDeque<usize>,
    /// every atom placed so far in the current component
    placed: Vec<usize>,
}

impl<'a> Sketcher<'a> {
    fn new(mol: &'a Molecule) -> Self {
        let mut atom_rings = vec![Vec::new(); mol.num_atoms()];
        for (r, ring) in mol.rings().iter().enumerate() {
            for &a in ring {
                atom_rings[a].push(r);
            }
        }
        Self {
            mol,
            coords: vec![None; mol.num_atoms()],
            atom_rings,
            ring_done: vec![false; mol.rings().len()],
            queue: VecDeque::new(),
            placed: Vec::new(),
        }
    }

    fn place(&mut self, atom: usize, p: Point) {
        trace!("placing atom {atom} at ({:.3}, {:.3})", p.x, p.y);
        self.coords[atom] = Some(p);
        self.queue.push_back(atom);
        self.placed.push(atom);
    }

    fn is_placed(&self, atom: usize) -> bool {
        self.coords[atom].is_some()
    }

    /// number of other rings sharing at least one atom with ring `r`
    fn fused_count(&self, r: usize) -> usize {
        let mut others: Vec<usize> = self.mol.rings()[r]
            .iter()
            .flat_map(|&a| self.atom_rings[a].iter().copied())
            .filter(|&o| o != r)
            .collect();
        others.sort_unstable();
        others.dedup();
        others.len()
    }

    /// start from the most fused ring if there is one, otherwise from the
    /// atom with the most neighbors
    fn pick_start(&self, comp: &[usize]) -> (usize, Option<usize>) {
        let ring = self
            .mol
            .rings()
            .iter()
            .enumerate()
            .filter(|(_, ring)| comp.binary_search(&ring[0]).is_ok())
            .max_by_key(|&(r, ring)| (self.fused_count(r), ring.len(), Reverse(r)))
            .map(|(r, _)| r);
        match ring {
            Some(r) => (self.mol.rings()[r][0], Some(r)),
            None => {
                let atom = comp
                    .iter()
                    .copied()
                    .max_by_key(|&a| (self.mol.neighbors(a).len(), Reverse(a)))
                    .unwrap_or(comp[0]);
                (atom, None)
            }
        }
    }

    fn place_component(&mut self, comp: &[usize]) {
        self.placed.clear();
        let (start, ring) = self.pick_start(comp);
        self.place(start, Point::ORIGIN);
        if let Some(r) = ring {
            self.place_ring_from_atom(r, start, Point::new(1.0, 0.0));
            self.complete_rings();
        }
        while let Some(atom) = self.queue.pop_front() {
            self.place_substituents(atom);
        }
    }

    /// place the unplaced neighbors of `atom` in the free space around it,
    /// laying out any ring they belong to as soon as they are placed
    fn place_substituents(&mut self, atom: usize) {
        let mol = self.mol;
        let Some(center) = self.coords[atom] else {
            return;
        };
        let mut placed = Vec::new();
        let mut new = Vec::new();
        for &(n, _) in mol.neighbors(atom) {
            if self.is_placed(n) {
                placed.push(n);
            } else {
                new.push(n);
            }
        }
        if new.is_empty() {
            return;
        }
        let angles = self.free_angles(atom, &placed, new.len());
        for (n, angle) in new.into_iter().zip(angles) {
            // already placed as part of a ring laid out for an earlier sibling
            if self.is_placed(n) {
                continue;
            }
            let angle = self.clear_angle(center, angle);
            self.place(n, center + Point::from_angle(angle) * BOND_LENGTH);
            self.complete_rings();
        }
    }

    /// directions (radians) for `count` new bonds at `atom`, given its
    /// already placed neighbors
    fn free_angles(&self, atom: usize, placed: &[usize], count: usize) -> Vec<f64> {
        let Some(center) = self.coords[atom] else {
            return vec![0.0; count];
        };
        let placed_angles: Vec<f64> = placed
            .iter()
            .filter_map(|&n| self.coords[n])
            .map(|p| (p - center).angle())
            .collect();

        match (placed_angles.as_slice(), count) {
            // a chain start heads right in a zig-zag
            ([], 1) => vec![-FRAC_PI_6],
            ([], 2) if self.is_linear(atom) => vec![0.0, PI],
            ([], 2) => vec![FRAC_PI_6, PI - FRAC_PI_6],
            ([], _) => (0..count)
                .map(|i| FRAC_PI_2 + TAU * i as f64 / count as f64)
                .collect(),
            (&[back], 1) if self.is_linear(atom) => vec![back + PI],
            (&[back], 1) => {
                vec![self.zigzag(atom, placed[0], [back + TAU / 3.0, back - TAU / 3.0])]
            }
            (angles, _) => {
                let mut sorted: Vec<f64> =
                    angles.iter().map(|a| a.rem_euclid(TAU)).collect();
                sorted.sort_by(f64::total_cmp);
                let (mut start, mut width) = (0.0, 0.0);
                for (i, &a) in sorted.iter().enumerate() {
                    let next = sorted.get(i + 1).copied().unwrap_or(sorted[0] + TAU);
                    if next - a > width {
                        (start, width) = (a, next - a);
                    }
                }
                (1..=count)
                    .map(|k| start + width * k as f64 / (count + 1) as f64)
                    .collect()
            }
        }
    }

    /// distance from `p` to the nearest atom placed so far
    fn room(&self, p: Point) -> f64 {
        self.placed
            .iter()
            .filter_map(|&a| self.coords[a])
            .map(|q| q.distance(p))
            .fold(f64::INFINITY, f64::min)
    }

    /// `angle` if a bond from `center` in that direction lands clear of every
    /// placed atom, otherwise the direction with the most room
    fn clear_angle(&self, center: Point, angle: f64) -> f64 {
        let at = |a: f64| center + Point::from_angle(a) * BOND_LENGTH;
        if self.room(at(angle)) >= CLASH_DISTANCE {
            return angle;
        }
        let best = (0..24)
            .map(|k| angle + TAU * k as f64 / 24.0)
            .max_by(|&a, &b| self.room(at(a)).total_cmp(&self.room(at(b))))
            .unwrap_or(angle);
        trace!("moved a crowded bond from {angle:.3} to {best:.3}");
        best
    }

    /// sp centers: two neighbors with a triple bond or two double bonds
    fn is_linear(&self, atom: usize) -> bool {
        let bonds = self.mol.neighbors(atom);
        if bonds.len() != 2 {
            return false;
        }
        let orders: Vec<BondOrder> =
            bonds.iter().map(|&(_, b)| self.mol.bonds()[b].order).collect();
        orders.contains(&BondOrder::Triple)
            || orders.iter().all(|&o| o == BondOrder::Double)
    }

    /// pick the option that puts the new atom trans to the parent's other
    /// neighbor, keeping chains zig-zagging. without such a neighbor prefer
    /// heading right
    fn zigzag(&self, atom: usize, parent: usize, options: [f64; 2]) -> f64 {
        let (Some(pa), Some(pos)) = (self.coords[parent], self.coords[atom]) else {
            return options[0];
        };
        let axis = pos - pa;
        let grandparent = self
            .mol
            .neighbors(parent)
            .iter()
            .filter(|&&(n, _)| n != atom)
            .find_map(|&(n, _)| self.coords[n]);
        let side = grandparent.map_or(0.0, |g| axis.cross(g - pa));
        if side.abs() > 1e-9 {
            for &angle in &options {
                let candidate = pos + Point::from_angle(angle) - pa;
                if axis.cross(candidate) * side < 0.0 {
                    return angle;
                }
            }
        }
        if options[0].cos() >= options[1].cos() {
            options[0]
        } else {
            options[1]
        }
    }

    /// lay out ring `r` as a regular polygon through the placed atom
    /// `anchor`, with its center in the direction `toward`
    fn place_ring_from_atom(&mut self, r: usize, anchor: usize, toward: Point) {
        let mol = self.mol;
        let ring = &mol.rings()[r];
        self.ring_done[r] = true;
        let (Some(k), Some(origin)) =
            (ring.iter().position(|&a| a == anchor), self.coords[anchor])
        else {
            return;
        };
        let n = ring.len();
        let radius = BOND_LENGTH / (2.0 * (PI / n as f64).sin());
        let center = origin + toward.normalized() * radius;
        let start = (origin - center).angle();
        let step = TAU / n as f64;
        for j in 1..n {
            let atom = ring[(k + j) % n];
            if !self.is_placed(atom) {
                let angle = start + step * j as f64;
                self.place(atom, center + Point::from_angle(angle) * radius);
            }
        }
    }

    /// unit vector pointing away from the placed neighbors of `atom`
    fn away_from_neighbors(&self, atom: usize) -> Point {
        let Some(center) = self.coords[atom] else {
            return Point::new(1.0, 0.0);
        };
        let pull: Point = self
            .mol
            .neighbors(atom)
            .iter()
            .filter_map(|&(n, _)| self.coords[n])
            .fold(Point::ORIGIN, |acc, p| acc + (p - center).normalized());
        if pull.length() < 1e-6 {
            Point::new(1.0, 0.0)
        } else {
            (-pull).normalized()
        }
    }

    /// lay out every unfinished ring that already has placed atoms, most
    /// constrained first, until none is left
    fn complete_rings(&mut self) {
        let mol = self.mol;
        loop {
            let next = mol
                .rings()
                .iter()
                .enumerate()
                .filter(|&(r, _)| !self.ring_done[r])
                .map(|(r, ring)| (r, ring.iter().filter(|&&a| self.is_placed(a)).count()))
                .filter(|&(_, placed)| placed > 0)
                .max_by_key(|&(r, placed)| (placed, Reverse(r)));
            let Some((r, placed)) = next else {
                break;
            };
            let ring = &mol.rings()[r];
            if placed == ring.len() {
                self.ring_done[r] = true;
            } else if placed == 1 {
                let Some(&anchor) = ring.iter().find(|&&a| self.is_placed(a)) else {
                    break;
                };
                let away = self.away_from_neighbors(anchor);
                self.place_ring_from_atom(r, anchor, away);
            } else {
                self.place_ring_arcs(r);
            }
        }
    }

    /// fill in each run of unplaced atoms of ring `r` between two placed ring
    /// atoms, bulging away from what is already drawn around them
    fn place_ring_arcs(&mut self, r: usize) {
        let mol = self.mol;
        let ring = &mol.rings()[r];
        self.ring_done[r] = true;
        let n = ring.len();
        let placed: Vec<bool> = ring.iter().map(|&a| self.is_placed(a)).collect();
        let mut runs = Vec::new();
        for i in 0..n {
            if !placed[i] || placed[(i + 1) % n] {
                continue;
            }
            let mut path = Vec::new();
            let mut j = (i + 1) % n;
            while !placed[j] {
                path.push(ring[j]);
                j = (j + 1) % n;
            }
            runs.push((ring[i], path, ring[j]));
        }
        for (x, path, y) in runs {
            let around: Vec<Point> = mol
                .neighbors(x)
                .iter()
                .chain(mol.neighbors(y))
                .map(|&(a, _)| a)
                .filter(|&a| a != x && a != y)
                .filter_map(|a| self.coords[a])
                .collect();
            let reference =
                (!around.is_empty()).then(|| Point::centroid(around));
            self.place_arc(x, &path, y, reference);
        }
    }

    /// place `path` on a circular arc from `x` to `y` with every bond at the
    /// nominal length, bulging away from `reference` when there is one
    fn place_arc(
        &mut self,
        x: usize,
        path: &[usize],
        y: usize,
        reference: Option<Point>,
    ) {
        let (Some(px), Some(py)) = (self.coords[x], self.coords[y]) else {
            return;
        };
        let segments = (path.len() + 1) as f64;
        let chord = py - px;
        let d = chord.length();
        let mid = px.midpoint(py);
        let mut normal = chord.perp().normalized();
        if reference.is_some_and(|r| (r - mid).dot(normal) > 0.0) {
            normal = -normal;
        }

        let ratio = d / BOND_LENGTH;
        if d < 1e-9 || ratio >= segments {
            // nothing to bend around: space the atoms out along the chord
            for (j, &atom) in path.iter().enumerate() {
                let t = (j + 1) as f64 / segments;
                let bump = if d < 1e-9 { normal * BOND_LENGTH } else { Point::ORIGIN };
                self.place(atom, px + chord * t + bump);
            }
            return;
        }

        // the angle each bond subtends at the arc's center:
        // sin(segments * phi / 2) / sin(phi / 2) == ratio on (0, 2pi / segments)
        let (mut lo, mut hi) = (1e-12, TAU / segments);
        for _ in 0..100 {
            let phi = 0.5 * (lo + hi);
            let g = (segments * phi / 2.0).sin() / (phi / 2.0).sin();
            if g > ratio {
                lo = phi;
            } else {
                hi = phi;
            }
        }
        let phi = 0.5 * (lo + hi);
        let radius = BOND_LENGTH / (2.0 * (phi / 2.0).sin());
        let h = (radius * radius - d * d / 4.0).max(0.0).sqrt();
        let sweep = segments * phi;
        let center = if sweep <= PI {
            mid - normal * h
        } else {
            mid + normal * h
        };
        let start = (px - center).angle();
        let bulge = |sign: f64| {
            let p = center + Point::from_angle(start + sign * sweep / 2.0) * radius;
            (p - mid).dot(normal)
        };
        let sign = if bulge(1.0) >= bulge(-1.0) { 1.0 } else { -1.0 };
        for (j, &atom) in path.iter().enumerate() {
            let angle = start + sign * phi * (j + 1) as f64;
            self.place(atom, center + Point::from_angle(angle) * radius);
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn laid_out(smiles: &str) -> Molecule {
        let mut mol = Molecule::from_smiles(smiles).unwrap();
        mol.compute_2d_coords();
        mol
    }

    fn assert_bond_lengths(mol: &Molecule) {
        let coords = mol.coords();
        for b in mol.bonds() {
            let len = coords[b.begin].distance(coords[b.end]);
            assert_abs_diff_eq!(len, BOND_LENGTH, epsilon = 1e-6);
        }
    }

    fn assert_no_clashes(mol: &Molecule) {
        let coords = mol.coords();
        for i in 0..coords.len() {
            for j in 0..i {
                assert!(
                    coords[i].distance(coords[j]) > 0.1,
                    "atoms {i} and {j} overlap"
                );
            }
        }
    }

    #[test]
    fn single_atom() {
        let mol = laid_out("C");
        assert_eq!(mol.coords(), &[Point::ORIGIN]);
    }

    #[test]
    fn chains() {
        for smiles in ["CCO", "CCCCCCCC", "CC(C)(C)C", "CC(C)CC(=O)O"] {
            let mol = laid_out(smiles);
            assert_eq!(mol.coords().len(), mol.num_atoms());
            assert_bond_lengths(&mol);
            assert_no_clashes(&mol);
        }
    }

    #[test]
    fn zigzag_angles() {
        let mol = laid_out("CCCC");
        let c = mol.coords();
        for i in 1..3 {
            let a = (c[i - 1] - c[i]).angle() - (c[i + 1] - c[i]).angle();
            let a = a.rem_euclid(TAU);
            let a = a.min(TAU - a);
            assert_abs_diff_eq!(a, TAU / 3.0, epsilon = 1e-9);
        }
        // trans: the ends sit on opposite sides of the middle bond
        let axis = c[2] - c[1];
        assert!(axis.cross(c[0] - c[1]) * axis.cross(c[3] - c[1]) < 0.0);
    }

    #[test]
    fn linear_alkyne() {
        let mol = laid_out("CC#CC");
        let c = mol.coords();
        let a = (c[0] - c[1]).normalized().dot((c[2] - c[1]).normalized());
        assert_abs_diff_eq!(a, -1.0, epsilon = 1e-9);
    }

    #[test]
    fn rings() {
        for smiles in [
            "C1CC1",
            "c1ccccc1",
            "c1ccc2ccccc2c1",
            "c1ccc2cc3ccccc3cc2c1",
            "c1ccccc1-c1ccccc1",
            "C1CCC2(C1)CCCCC2",
            "CC(=O)Oc1ccccc1C(=O)O",
        ] {
            let mol = laid_out(smiles);
            assert_bond_lengths(&mol);
            assert_no_clashes(&mol);
        }
    }

    #[test]
    fn regular_hexagon() {
        let mol = laid_out("C1CCCCC1");
        let c = mol.coords();
        let center = Point::centroid(c.iter().copied());
        for p in c {
            assert_abs_diff_eq!(p.distance(center), BOND_LENGTH, epsilon = 1e-9);
        }
    }

    #[test]
    fn bridged_ring_is_placed() {
        let mol = laid_out("C1CC2CCC1C2");
        assert_eq!(mol.coords().len(), 7);
        assert_no_clashes(&mol);
    }

    #[test]
    fn cages_do_not_collapse() {
        // adamantan-2-ol, cubane and a norbornane bridge
        for smiles in [
            "OC1C2CC3CC1CC(C2)C3",
            "C12C3C4C1C5C2C3C45",
            "C1CC2CCC1C2",
        ] {
            let mol = laid_out(smiles);
            let c = mol.coords();
            assert!(c.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
            for i in 0..c.len() {
                for j in 0..i {
                    assert!(
                        c[i].distance(c[j]) > 0.3,
                        "atoms {i} and {j} of {smiles} overlap"
                    );
                }
            }
            for b in mol.bonds() {
                let len = c[b.begin].distance(c[b.end]);
                assert!(len > 0.5 * BOND_LENGTH && len < 2.0 * BOND_LENGTH);
            }
        }
    }

    #[test]
    fn relaxation_separates_coincident_atoms() {
        // a three-membered ring squashed onto one point
        let bonds = [(0, 1), (1, 2), (2, 0)];
        let mut points = vec![Point::ORIGIN; 3];
        assert!(has_defects(&bonds, &points));
        relax(&bonds, &mut points);
        assert!(!has_defects(&bonds, &points));
        for &(i, j) in &bonds {
            assert_abs_diff_eq!(points[i].distance(points[j]), BOND_LENGTH, epsilon = 0.05);
        }
    }

    #[test]
    fn components_do_not_overlap() {
        let mol = laid_out("CCO.c1ccccc1.[Na+]");
        let c = mol.coords();
        let span = |atoms: std::ops::Range<usize>| {
            let xs: Vec<f64> = atoms.map(|a| c[a].x).collect();
            let min = xs.iter().copied().fold(f64::INFINITY, f64::min);
            let max = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            (min, max)
        };
        let (ethanol, benzene, sodium) = (span(0..3), span(3..9), span(9..10));
        assert!(ethanol.1 < benzene.0);
        assert!(benzene.1 < sodium.0);
    }
}
