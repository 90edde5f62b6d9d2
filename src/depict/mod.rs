//! The depiction toolkit: SMILES parsing, 2D coordinate generation, and SVG
//! and PNG rendering of a single [Molecule].

use std::borrow::Cow;

use log::debug;
use purr::feature::BondKind;

use crate::{config::DrawOptions, Error};

pub mod atom;
pub(crate) mod coords;
pub mod draw;
pub mod point;
pub(crate) mod raster;
pub(crate) mod rings;

pub use atom::Atom;
pub use draw::MolDraw2DSvg;
pub use point::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BondOrder {
    Single,
    Double,
    Triple,
    Quadruple,
    Aromatic,
}

impl BondOrder {
    /// an elided bond is aromatic between two aromatic atoms and single
    /// otherwise. bond direction only matters for stereo, which is not drawn
    fn from_kind(kind: &BondKind, aromatic_ends: bool) -> Self {
        match kind {
            BondKind::Elided if aromatic_ends => Self::Aromatic,
            BondKind::Elided | BondKind::Single | BondKind::Up | BondKind::Down => {
                Self::Single
            }
            BondKind::Double => Self::Double,
            BondKind::Triple => Self::Triple,
            BondKind::Quadruple => Self::Quadruple,
            BondKind::Aromatic => Self::Aromatic,
        }
    }

    /// contribution to an atom's valence, counting aromatic bonds once
    pub(crate) fn valence(self) -> u32 {
        match self {
            BondOrder::Single | BondOrder::Aromatic => 1,
            BondOrder::Double => 2,
            BondOrder::Triple => 3,
            BondOrder::Quadruple => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bond {
    pub begin: usize,
    pub end: usize,
    pub order: BondOrder,
}

impl Bond {
    /// the atom at the other end of the bond from `atom`
    pub fn other(&self, atom: usize) -> usize {
        if self.begin == atom {
            self.end
        } else {
            self.begin
        }
    }
}

#[derive(Debug, Clone)]
pub struct Molecule {
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    /// (neighbor, bond index) pairs for each atom
    adjacency: Vec<Vec<(usize, usize)>>,
    /// smallest set of smallest rings, each in cycle order
    rings: Vec<Vec<usize>>,
    coords: Vec<Point>,
}

impl Molecule {
    /// parse `smiles` with purr, perceive rings and a kekulé structure, and
    /// check every atom against its normal valences. empty input, aromatic
    /// systems without a kekulé structure, and over-valent atoms are all
    /// rejected as invalid SMILES
    pub fn from_smiles(smiles: &str) -> Result<Self, Error> {
        let invalid = || Error::InvalidSmiles(smiles.to_owned());
        if smiles.is_empty() {
            return Err(invalid());
        }

        let mut builder = purr::graph::Builder::new();
        if let Err(e) = purr::read::read(smiles, &mut builder, None) {
            debug!("purr failed to read {smiles:?}: {e:?}");
            return Err(invalid());
        }
        let graph = match builder.build() {
            Ok(graph) => graph,
            Err(e) => {
                debug!("purr failed to build a graph for {smiles:?}: {e:?}");
                return Err(invalid());
            }
        };

        let mut atoms = Vec::with_capacity(graph.len());
        for a in &graph {
            let Some(atom) = Atom::from_purr(a) else {
                debug!("unknown element {} in {smiles:?}", a.kind);
                return Err(invalid());
            };
            atoms.push(atom);
        }

        let mut bonds = Vec::new();
        for (i, a) in graph.iter().enumerate() {
            for b in a.bonds.iter().filter(|b| b.tid > i) {
                let aromatic_ends = atoms[i].aromatic && atoms[b.tid].aromatic;
                bonds.push(Bond {
                    begin: i,
                    end: b.tid,
                    order: BondOrder::from_kind(&b.kind, aromatic_ends),
                });
            }
        }

        let mut adjacency = vec![Vec::new(); atoms.len()];
        for (idx, b) in bonds.iter().enumerate() {
            adjacency[b.begin].push((b.end, idx));
            adjacency[b.end].push((b.begin, idx));
        }

        let mut mol = Self {
            rings: rings::find_sssr(atoms.len(), &bonds, &adjacency),
            atoms,
            bonds,
            adjacency,
            coords: Vec::new(),
        };
        if !mol.kekulize() {
            debug!("no kekulé structure for {smiles:?}");
            return Err(invalid());
        }
        for (i, atom) in mol.atoms.iter().enumerate() {
            let used = mol.valence(i) + atom.hydrogens as u32;
            if atom.max_valence().is_some_and(|max| used > max) {
                debug!(
                    "atom {i} ({}) in {smiles:?} has valence {used}",
                    atom.symbol()
                );
                return Err(invalid());
            }
        }
        Ok(mol)
    }

    pub fn num_atoms(&self) -> usize {
        self.atoms.len()
    }

    pub fn num_bonds(&self) -> usize {
        self.bonds.len()
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn rings(&self) -> &[Vec<usize>] {
        &self.rings
    }

    /// (neighbor, bond index) pairs of `atom`
    pub fn neighbors(&self, atom: usize) -> &[(usize, usize)] {
        &self.adjacency[atom]
    }

    /// 2D coordinates, one per atom, or an empty slice before
    /// [Molecule::compute_2d_coords] has been called
    pub fn coords(&self) -> &[Point] {
        &self.coords
    }

    /// sum of the bond orders at `atom`, aromatic bonds counted once
    fn valence(&self, atom: usize) -> u32 {
        self.adjacency[atom]
            .iter()
            .map(|&(_, b)| self.bonds[b].order.valence())
            .sum()
    }

    /// generate 2D depiction coordinates, replacing any existing ones
    pub fn compute_2d_coords(&mut self) {
        self.coords = coords::layout(self);
    }

    fn coords_or_layout(&self) -> Cow<'_, [Point]> {
        if self.coords.len() == self.atoms.len() {
            Cow::Borrowed(&self.coords)
        } else {
            Cow::Owned(coords::layout(self))
        }
    }

    /// draw the molecule as an SVG document of `width` x `height` pixels.
    /// coordinates are generated on the fly if they have not been computed
    pub fn draw_svg(&self, width: u32, height: u32, opts: &DrawOptions) -> String {
        let coords = self.coords_or_layout();
        let mut drawer = MolDraw2DSvg::new(width, height, opts);
        drawer.draw_molecule(self, &coords);
        drawer.finish_drawing();
        drawer.into_text()
    }

    /// draw the molecule and encode it as a PNG image of `width` x `height`
    /// pixels
    pub fn draw_png(
        &self,
        width: u32,
        height: u32,
        opts: &DrawOptions,
    ) -> Result<Vec<u8>, Error> {
        raster::svg_to_png(&self.draw_svg(width, height, opts), width, height)
    }

    /// replace aromatic bonds with an alternating single/double assignment.
    /// returns false if no assignment satisfies every atom that needs a
    /// double bond
    fn kekulize(&mut self) -> bool {
        if !self.bonds.iter().any(|b| b.order == BondOrder::Aromatic) {
            return true;
        }
        let need: Vec<bool> = (0..self.atoms.len())
            .map(|i| self.atoms[i].needs_pi_bond(self.valence(i)))
            .collect();
        let mut mates = vec![None; self.atoms.len()];
        // bail out of pathological systems instead of searching forever
        let mut budget = 100_000;
        if !self.match_pi_bonds(&need, &mut mates, &mut budget) {
            return false;
        }
        for (idx, bond) in self.bonds.iter_mut().enumerate() {
            if bond.order == BondOrder::Aromatic {
                bond.order = if mates[bond.begin] == Some(idx) {
                    BondOrder::Double
                } else {
                    BondOrder::Single
                };
            }
        }
        true
    }

    /// backtracking search for a perfect matching of the atoms in `need` over
    /// aromatic bonds. `mates` holds the matched bond of each atom
    fn match_pi_bonds(
        &self,
        need: &[bool],
        mates: &mut [Option<usize>],
        budget: &mut usize,
    ) -> bool {
        let free_partners = |mates: &[Option<usize>], a: usize| {
            self.adjacency[a]
                .iter()
                .filter(|&&(n, b)| {
                    self.bonds[b].order == BondOrder::Aromatic
                        && need[n]
                        && mates[n].is_none()
                })
                .count()
        };
        // the most constrained atom first
        let view: &[Option<usize>] = mates;
        let Some(a) = (0..need.len())
            .filter(|&a| need[a] && view[a].is_none())
            .min_by_key(|&a| free_partners(view, a))
        else {
            return true;
        };
        for &(n, b) in &self.adjacency[a] {
            if self.bonds[b].order != BondOrder::Aromatic
                || !need[n]
                || mates[n].is_some()
            {
                continue;
            }
            if *budget == 0 {
                return false;
            }
            *budget -= 1;
            mates[a] = Some(b);
            mates[n] = Some(b);
            if self.match_pi_bonds(need, mates, budget) {
                return true;
            }
            mates[a] = None;
            mates[n] = None;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(mol: &Molecule, order: BondOrder) -> usize {
        mol.bonds().iter().filter(|b| b.order == order).count()
    }

    #[test]
    fn ethanol() {
        let mol = Molecule::from_smiles("CCO").unwrap();
        assert_eq!(mol.num_atoms(), 3);
        assert_eq!(mol.num_bonds(), 2);
        let hs: Vec<_> = mol.atoms().iter().map(|a| a.hydrogens).collect();
        assert_eq!(hs, vec![3, 2, 1]);
        assert!(mol.rings().is_empty());
        assert!(mol.coords().is_empty());
    }

    #[test]
    fn invalid_smiles() {
        for smiles in ["not_a_molecule", "", "C(C", "CC)"] {
            match Molecule::from_smiles(smiles) {
                Err(Error::InvalidSmiles(s)) => assert_eq!(s, smiles),
                other => panic!("expected an error for {smiles:?}: {other:?}"),
            }
        }
    }

    #[test]
    fn benzene_kekulizes() {
        let mol = Molecule::from_smiles("c1ccccc1").unwrap();
        assert_eq!(mol.num_bonds(), 6);
        assert_eq!(mol.rings().len(), 1);
        assert_eq!(count(&mol, BondOrder::Double), 3);
        assert_eq!(count(&mol, BondOrder::Single), 3);
        assert!(mol.atoms().iter().all(|a| a.hydrogens == 1));
    }

    #[test]
    fn pyrrole_kekulizes() {
        let mol = Molecule::from_smiles("c1cc[nH]c1").unwrap();
        assert_eq!(count(&mol, BondOrder::Double), 2);
        assert_eq!(count(&mol, BondOrder::Aromatic), 0);
    }

    #[test]
    fn over_valent_atoms() {
        for smiles in ["F(F)F", "CC(C)(C)(C)(C)C", "C=N(=C)(C)C", "[CH5]"] {
            match Molecule::from_smiles(smiles) {
                Err(Error::InvalidSmiles(s)) => assert_eq!(s, smiles),
                other => panic!("expected {smiles:?} to be rejected: {other:?}"),
            }
        }
        // the next normal valence still counts
        assert!(Molecule::from_smiles("CS(=O)(=O)C").is_ok());
    }

    #[test]
    fn unkekulizable_rejected() {
        // five aromatic carbons cannot all be paired
        for smiles in ["c1cccc1", "c1ccccc1c"] {
            match Molecule::from_smiles(smiles) {
                Err(Error::InvalidSmiles(s)) => assert_eq!(s, smiles),
                other => panic!("expected {smiles:?} to be rejected: {other:?}"),
            }
        }
        assert!(Molecule::from_smiles("c1ccc2ccccc2c1").is_ok());
    }

    #[test]
    fn explicit_bonds() {
        let mol = Molecule::from_smiles("C#CC=O").unwrap();
        let orders: Vec<_> = mol.bonds().iter().map(|b| b.order).collect();
        assert_eq!(
            orders,
            vec![BondOrder::Triple, BondOrder::Single, BondOrder::Double]
        );
    }

    #[test]
    fn disconnected() {
        let mol = Molecule::from_smiles("[Na+].[Cl-]").unwrap();
        assert_eq!(mol.num_atoms(), 2);
        assert_eq!(mol.num_bonds(), 0);
        assert_eq!(mol.atoms()[0].charge, 1);
        assert_eq!(mol.atoms()[1].charge, -1);
    }
}
