use purr::feature::{Aliphatic, AtomKind, BracketSymbol, Element};

/// element symbols indexed by atomic number. index 0 is the SMILES wildcard
const SYMBOLS: [&str; 119] = [
    "*", "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al",
    "Si", "P", "S", "Cl", "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe",
    "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As", "Se", "Br", "Kr", "Rb", "Sr", "Y",
    "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In", "Sn", "Sb",
    "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd",
    "Tb", "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir",
    "Pt", "Au", "Hg", "Tl", "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac",
    "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk", "Cf", "Es", "Fm", "Md", "No",
    "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg", "Cn", "Nh", "Fl",
    "Mc", "Lv", "Ts", "Og",
];

pub fn element_number(symbol: &str) -> Option<u8> {
    SYMBOLS.iter().position(|&s| s == symbol).map(|n| n as u8)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    /// atomic number, 0 for `*`
    pub element: u8,
    pub aromatic: bool,
    pub charge: i8,
    pub isotope: Option<u16>,
    /// the bracket `H` count, or the implicit count for organic-subset atoms
    pub hydrogens: u8,
    pub map: Option<u16>,
    /// normal valences for this element and charge, empty if unrestricted
    valences: Vec<u8>,
}

impl Atom {
    /// convert a parsed purr atom. returns `None` only for an element symbol
    /// missing from the periodic table above
    pub(crate) fn from_purr(atom: &purr::graph::Atom) -> Option<Self> {
        let (symbol, charge, isotope, map) = match &atom.kind {
            AtomKind::Star => ("*".to_owned(), 0, None, None),
            AtomKind::Aliphatic(a) => (a.to_string(), 0, None, None),
            AtomKind::Aromatic(a) => {
                let a: Aliphatic = a.into();
                (a.to_string(), 0, None, None)
            }
            AtomKind::Bracket {
                isotope,
                symbol,
                charge,
                map,
                ..
            } => {
                let symbol = match symbol {
                    BracketSymbol::Star => "*".to_owned(),
                    BracketSymbol::Element(e) => e.to_string(),
                    BracketSymbol::Aromatic(a) => {
                        let e: Element = a.into();
                        e.to_string()
                    }
                };
                (
                    symbol,
                    charge.as_ref().map_or(0i8, |c| c.into()),
                    isotope.as_ref().map(u16::from),
                    map.as_ref().map(u16::from),
                )
            }
        };
        Some(Self {
            element: element_number(&symbol)?,
            aromatic: atom.is_aromatic(),
            charge,
            isotope,
            hydrogens: atom.suppressed_hydrogens(),
            map,
            valences: atom.kind.targets().to_vec(),
        })
    }

    pub fn symbol(&self) -> &'static str {
        SYMBOLS[self.element as usize]
    }

    /// the largest normal valence, or `None` for elements without one
    pub fn max_valence(&self) -> Option<u32> {
        self.valences.iter().max().map(|&v| v as u32)
    }

    /// whether an aromatic atom must take a double bond in a kekulé structure
    /// given the sum of its bond orders, aromatic bonds counted once
    pub(crate) fn needs_pi_bond(&self, valence: u32) -> bool {
        let used = valence + self.hydrogens as u32 + 1;
        self.aromatic && self.valences.iter().any(|&v| v as u32 == used)
    }

    /// drawing colour, loosely following the CPK convention
    pub fn color(&self) -> &'static str {
        match self.element {
            7 => "#0000FF",
            8 => "#FF0000",
            9 => "#33CCCC",
            15 => "#FF7F00",
            16 => "#CCCC00",
            17 => "#00CC00",
            35 => "#7F4C19",
            53 => "#A01EF0",
            _ => "#000000",
        }
    }
}
