use smidraw::{config::DrawOptions, depict::Molecule};

fn main() {
    divan::main();
}

const SMILES: &[&str] = &[
    "CC(=O)Oc1ccccc1C(=O)O",
    "CN1CCC[C@H]1c2cccnc2",
    "Cc1ccc(NC(=O)c2ccc(CN3CCN(C)CC3)cc2)cc1Nc1nccc(-c2cccnc2)n1",
];

#[divan::bench(args = SMILES)]
fn layout(smiles: &str) -> Molecule {
    let mut mol = Molecule::from_smiles(smiles).unwrap();
    mol.compute_2d_coords();
    mol
}

#[divan::bench(args = SMILES)]
fn svg(bencher: divan::Bencher, smiles: &str) {
    let mut mol = Molecule::from_smiles(smiles).unwrap();
    mol.compute_2d_coords();
    let opts = DrawOptions::default();
    bencher.bench_local(|| mol.draw_svg(400, 300, &opts));
}
