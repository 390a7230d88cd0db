//! Defect pairs on a planar lattice: inject a burst, inspect the syndrome,
//! route correction paths between nearest pairs, and watch the defects vanish.

use planar_code_sim::prelude::*;

fn draw(lattice: &PlanarLattice) {
    let syn = Syndrome::measure(lattice);
    for fy in 0..lattice.height() as i32 {
        print!("  ");
        for fx in 0..lattice.width() as i32 {
            print!("{}", if syn.get(Face::new(fx, fy)) { " ●" } else { " ·" });
        }
        println!();
    }
}

fn main() -> Result<(), SimError> {
    let mut lattice = PlanarLattice::new(8, 6)?;
    let mut rng = SimRng::new(2024);

    println!("═══ 1. Noise burst (4 fresh interior toggles) ═══");
    let applied = inject_defect_pairs(&mut lattice, &mut rng, 4);
    println!("  toggles applied: {}", applied);
    println!("  error edges:     {}", lattice.error_count());
    draw(&lattice);

    let defects = lattice.list_defects();
    println!();
    println!("  defects (row-major): {:?}", defects.iter().map(|f| (f.fx, f.fy)).collect::<Vec<_>>());

    println!();
    println!("═══ 2. Nearest-pair correction ═══");
    for (a, b) in pair_nearest(&defects) {
        let steps = apply_correction_path(&mut lattice, a, b)?;
        println!("  {} -> {}  ({} dual steps)", a, b, steps);
    }
    draw(&lattice);
    println!("  remaining defects: {}", lattice.defect_count());

    println!();
    println!("═══ 3. Boundary edge: a lone defect ═══");
    lattice.reset();
    lattice.toggle_edge(Edge::horizontal(3, 0));
    draw(&lattice);
    println!("  defects: {}", lattice.defect_count());

    Ok(())
}
