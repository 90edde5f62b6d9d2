use std::collections::{HashSet, VecDeque};

use super::Bond;

/// the shortest path from `from` to `to` that does not use bond `skip`, as
/// the sequence of atoms (including both ends) and the bonds between them
fn shortest_path(
    adjacency: &[Vec<(usize, usize)>],
    from: usize,
    to: usize,
    skip: usize,
) -> Option<(Vec<usize>, Vec<usize>)> {
    // (previous atom, bond to it) along the search tree
    let mut prev = vec![(usize::MAX, usize::MAX); adjacency.len()];
    prev[from] = (from, usize::MAX);
    let mut queue = VecDeque::from([from]);
    while let Some(a) = queue.pop_front() {
        if a == to {
            let mut atoms = vec![to];
            let mut bonds = Vec::new();
            let mut cur = to;
            while cur != from {
                let (p, b) = prev[cur];
                bonds.push(b);
                atoms.push(p);
                cur = p;
            }
            atoms.reverse();
            return Some((atoms, bonds));
        }
        for &(n, b) in &adjacency[a] {
            if b == skip || prev[n].0 != usize::MAX {
                continue;
            }
            prev[n] = (a, b);
            queue.push_back(n);
        }
    }
    None
}

/// bit set over bond indices, used to test rings for linear independence
#[derive(Clone, PartialEq, Eq, Hash)]
struct EdgeSet(Vec<u64>);

impl EdgeSet {
    fn new(nbonds: usize) -> Self {
        Self(vec![0; nbonds.div_ceil(64)])
    }

    fn insert(&mut self, bond: usize) {
        self.0[bond / 64] |= 1 << (bond % 64);
    }

    fn contains(&self, bond: usize) -> bool {
        self.0[bond / 64] & (1 << (bond % 64)) != 0
    }

    fn xor(&mut self, other: &Self) {
        for (a, b) in self.0.iter_mut().zip(&other.0) {
            *a ^= b;
        }
    }

    fn lowest(&self) -> Option<usize> {
        self.0
            .iter()
            .enumerate()
            .find(|(_, w)| **w != 0)
            .map(|(i, w)| i * 64 + w.trailing_zeros() as usize)
    }
}

/// Gaussian elimination basis over GF(2), keyed by pivot bond
struct CycleBasis {
    rows: Vec<(usize, EdgeSet)>,
}

impl CycleBasis {
    /// add `cycle` if it is independent of the cycles already present
    fn try_add(&mut self, mut cycle: EdgeSet) -> bool {
        for (pivot, row) in &self.rows {
            if cycle.contains(*pivot) {
                cycle.xor(row);
            }
        }
        match cycle.lowest() {
            Some(pivot) => {
                for (_, row) in &mut self.rows {
                    if row.contains(pivot) {
                        row.xor(&cycle);
                    }
                }
                self.rows.push((pivot, cycle));
                true
            }
            None => false,
        }
    }
}

/// number of independent cycles, E - V + C
fn cycle_rank(natoms: usize, adjacency: &[Vec<(usize, usize)>], nbonds: usize) -> usize {
    let mut seen = vec![false; natoms];
    let mut components = 0;
    for start in 0..natoms {
        if seen[start] {
            continue;
        }
        components += 1;
        seen[start] = true;
        let mut stack = vec![start];
        while let Some(a) = stack.pop() {
            for &(n, _) in &adjacency[a] {
                if !seen[n] {
                    seen[n] = true;
                    stack.push(n);
                }
            }
        }
    }
    (nbonds + components).saturating_sub(natoms)
}

/// find a smallest set of smallest rings. every bond contributes the
/// shortest cycle through it; candidates are then taken smallest first while
/// they stay linearly independent. each ring is returned in cycle order
pub(crate) fn find_sssr(
    natoms: usize,
    bonds: &[Bond],
    adjacency: &[Vec<(usize, usize)>],
) -> Vec<Vec<usize>> {
    let want = cycle_rank(natoms, adjacency, bonds.len());
    if want == 0 {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    let mut candidates = Vec::new();
    for (idx, bond) in bonds.iter().enumerate() {
        let Some((path, path_bonds)) =
            shortest_path(adjacency, bond.begin, bond.end, idx)
        else {
            continue;
        };
        let mut edges = EdgeSet::new(bonds.len());
        edges.insert(idx);
        for b in path_bonds {
            edges.insert(b);
        }
        if seen.insert(edges.clone()) {
            candidates.push((path, edges));
        }
    }
    // stable, so ties keep bond order
    candidates.sort_by_key(|(path, _)| path.len());

    let mut basis = CycleBasis { rows: Vec::new() };
    let mut rings = Vec::with_capacity(want);
    for (path, edges) in candidates {
        if rings.len() == want {
            break;
        }
        if basis.try_add(edges) {
            rings.push(path);
        }
    }
    rings
}

#[cfg(test)]
mod tests {
    use crate::depict::Molecule;

    fn ring_sizes(smiles: &str) -> Vec<usize> {
        let mol = Molecule::from_smiles(smiles).unwrap();
        let mut sizes: Vec<_> = mol.rings().iter().map(|r| r.len()).collect();
        sizes.sort();
        sizes
    }

    #[test]
    fn simple_rings() {
        assert_eq!(ring_sizes("CCO"), Vec::<usize>::new());
        assert_eq!(ring_sizes("C1CC1"), vec![3]);
        assert_eq!(ring_sizes("c1ccccc1"), vec![6]);
    }

    #[test]
    fn fused_and_spiro() {
        assert_eq!(ring_sizes("c1ccc2ccccc2c1"), vec![6, 6]);
        assert_eq!(ring_sizes("c1ccc2cc3ccccc3cc2c1"), vec![6, 6, 6]);
        assert_eq!(ring_sizes("C1CCC2(C1)CCCCC2"), vec![5, 6]);
        assert_eq!(ring_sizes("C1CC2CCC1C2"), vec![5, 5]);
    }

    #[test]
    fn rings_are_cycles() {
        let mol = Molecule::from_smiles("c1ccc2ccccc2c1").unwrap();
        for ring in mol.rings() {
            for i in 0..ring.len() {
                let (a, b) = (ring[i], ring[(i + 1) % ring.len()]);
                assert!(mol.neighbors(a).iter().any(|&(n, _)| n == b));
            }
        }
    }
}
