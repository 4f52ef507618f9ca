#![no_main]

use libfuzzer_sys::fuzz_target;
use parallel_dlx::{CoverMatrix, IndexedInstance, LinkedInstance, Solution};
use std::collections::BTreeSet;

const NUM_COLUMNS: usize = 8;

#[derive(Debug)]
struct MatrixInput {
    rows: Vec<u8>,
    primary_columns: usize,
    depth: usize,
}

impl<'a> arbitrary::Arbitrary<'a> for MatrixInput {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let num_rows = u.int_in_range(0..=24)?;
        let rows = (0..num_rows)
            .map(|_| u.arbitrary::<u8>())
            .collect::<arbitrary::Result<_>>()?;

        Ok(MatrixInput {
            rows,
            primary_columns: u.int_in_range(0..=NUM_COLUMNS)?,
            depth: u.int_in_range(0..=3)?,
        })
    }
}

fuzz_target!(|data: MatrixInput| {
    let rows = data
        .rows
        .iter()
        .map(|bits| (0..NUM_COLUMNS).filter(move |column| bits & (1 << column) != 0));
    let matrix = CoverMatrix::from_rows(NUM_COLUMNS, Some(data.primary_columns), rows).unwrap();

    let linked: BTreeSet<Solution> = LinkedInstance::new(&matrix).search().collect();
    let indexed: BTreeSet<Solution> = IndexedInstance::new(&matrix).unwrap().search().collect();
    let parallel: Vec<Solution> = IndexedInstance::new(&matrix)
        .unwrap()
        .par_search(data.depth);

    assert_eq!(linked, indexed);
    assert_eq!(parallel.len(), linked.len());
    assert_eq!(parallel.into_iter().collect::<BTreeSet<_>>(), linked);

    for solution in &linked {
        assert!(!solution.is_empty());

        let mut counts = [0; NUM_COLUMNS];
        for &row in solution {
            for &column in matrix.row(row) {
                counts[column] += 1;
            }
        }
        for (column, count) in counts.into_iter().enumerate() {
            if column < data.primary_columns {
                assert_eq!(count, 1);
            } else {
                assert!(count <= 1);
            }
        }
    }
});
