use tracing::debug;

use super::*;

/// First bytes of every snapshot
pub const SNAPSHOT_MAGIC: [u8; 8] = *b"FLATGRPH";

/// Current (and only supported) version of the snapshot format
pub const SNAPSHOT_VERSION: u8 = 1;

const FLAG_WEIGHTED: u8 = 1;
const FLAG_OPTIMIZED: u8 = 2;

/// Counts in a snapshot are untrusted; larger collections grow on demand
const MAX_PREALLOCATION: usize = 1 << 16;

impl<N, S> SnapshotWrite for MemoryGraph<N, S>
where
    N: SnapshotLabel,
    S: EdgeStore,
{
    fn try_write_snapshot<W>(&self, mut writer: W) -> GraphResult<()>
    where
        W: Write,
    {
        let (nodes, store, optimized) = self.raw_parts();

        let mut flags = 0;
        if S::WEIGHTED {
            flags |= FLAG_WEIGHTED;
        }
        if optimized {
            flags |= FLAG_OPTIMIZED;
        }

        writer.write_all(&SNAPSHOT_MAGIC)?;
        writer.write_all(&[SNAPSHOT_VERSION, flags])?;

        writer.write_all(&(nodes.len() as u64).to_le_bytes())?;
        for label in nodes.labels() {
            label.write_label(&mut writer)?;
        }

        writer.write_all(&(store.len() as u64).to_le_bytes())?;
        for slot in 0..store.len() {
            let Edge(u, v) = store.endpoints(slot);
            writer.write_all(&u.to_le_bytes())?;
            writer.write_all(&v.to_le_bytes())?;
        }

        if S::WEIGHTED {
            for slot in 0..store.len() {
                writer.write_all(&store.weight_of(slot).to_bits().to_le_bytes())?;
            }
        }

        writer.flush()?;

        debug!(
            nodes = nodes.len(),
            edges = store.len(),
            weighted = S::WEIGHTED,
            optimized,
            "wrote graph snapshot"
        );
        Ok(())
    }
}

impl<N, S> SnapshotRead for MemoryGraph<N, S>
where
    N: SnapshotLabel,
    S: EdgeStore,
{
    fn try_read_snapshot<R>(mut reader: R) -> GraphResult<Self>
    where
        R: Read,
    {
        let magic: [u8; 8] = read_bytes(&mut reader)?;
        raise_error_unless!(
            magic == SNAPSHOT_MAGIC,
            ErrorKind::InvalidData,
            "Input is not a graph snapshot."
        );

        let [version, flags] = read_bytes::<2, _>(&mut reader)?;
        raise_error_unless!(
            version == SNAPSHOT_VERSION,
            ErrorKind::InvalidData,
            format!("Unsupported snapshot version {version}.")
        );
        raise_error_unless!(
            flags & !(FLAG_WEIGHTED | FLAG_OPTIMIZED) == 0,
            ErrorKind::InvalidData,
            format!("Unknown snapshot flags {flags:#04x}.")
        );
        raise_error_unless!(
            (flags & FLAG_WEIGHTED != 0) == S::WEIGHTED,
            ErrorKind::InvalidData,
            if S::WEIGHTED {
                "Expected a weighted snapshot, found an unweighted one."
            } else {
                "Expected an unweighted snapshot, found a weighted one."
            }
        );
        let optimized = flags & FLAG_OPTIMIZED != 0;

        let number_of_nodes = u64::from_le_bytes(read_bytes(&mut reader)?);
        raise_error_unless!(
            number_of_nodes <= NodeId::MAX as u64,
            ErrorKind::InvalidData,
            format!("Snapshot claims {number_of_nodes} nodes.")
        );
        let number_of_nodes = number_of_nodes as usize;

        let mut nodes = NodeIndex::with_capacity(number_of_nodes.min(MAX_PREALLOCATION));
        for expected in 0..number_of_nodes {
            let label = N::read_label(&mut reader)?;
            let id = nodes.insert(label);
            raise_error_unless!(
                id as usize == expected,
                ErrorKind::InvalidData,
                format!("Node {expected} repeats the label of node {id}.")
            );
        }

        let number_of_edges = u64::from_le_bytes(read_bytes(&mut reader)?);
        let number_of_edges = usize::try_from(number_of_edges)
            .map_err(|err| io_error!(ErrorKind::InvalidData, err))?;

        let mut edges = Vec::with_capacity(number_of_edges.min(MAX_PREALLOCATION));
        for slot in 0..number_of_edges {
            let u = NodeId::from_le_bytes(read_bytes(&mut reader)?);
            let v = NodeId::from_le_bytes(read_bytes(&mut reader)?);
            raise_error_unless!(
                (0..number_of_nodes as NodeId).contains(&u)
                    && (0..number_of_nodes as NodeId).contains(&v),
                ErrorKind::InvalidData,
                format!("Edge {slot} ({u},{v}) references a node outside of 0..{number_of_nodes}.")
            );
            edges.push(Edge(u, v));
        }

        let mut store = S::default();
        store.reserve(edges.len());
        for (slot, edge) in edges.into_iter().enumerate() {
            let weight = if S::WEIGHTED {
                let weight = f64::from_bits(u64::from_le_bytes(read_bytes(&mut reader)?));
                raise_error_unless!(
                    weight.is_finite(),
                    ErrorKind::InvalidData,
                    format!("Edge {slot} has non-finite weight {weight}.")
                );
                weight
            } else {
                1.0
            };
            store.push_edge(edge, weight);
        }

        raise_error_unless!(
            !optimized || is_sorted(&store),
            ErrorKind::InvalidData,
            "Snapshot is marked as optimized but its edges are not sorted."
        );

        debug!(
            nodes = number_of_nodes,
            edges = store.len(),
            weighted = S::WEIGHTED,
            optimized,
            "read graph snapshot"
        );
        Ok(Self::from_raw_parts(nodes, store, optimized))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::{gens::*, repr::digest::GraphDigest};
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    fn snapshot_of<G: SnapshotWrite>(graph: &G) -> Vec<u8> {
        let mut buffer = Vec::new();
        graph.try_write_snapshot(&mut buffer).unwrap();
        buffer
    }

    fn read_err<G: SnapshotRead + std::fmt::Debug>(bytes: Vec<u8>) -> std::io::Error {
        match G::try_read_snapshot(Cursor::new(bytes)).unwrap_err() {
            GraphError::Storage(err) => err,
            err => panic!("expected a storage error, got {err}"),
        }
    }

    fn small_graph() -> DenseMemoryGraph<u32> {
        let mut graph = DenseMemoryGraph::new();
        graph.add_edges([(3, 1), (1, 2), (2, 3), (1, 1)]);
        graph
    }

    #[test]
    fn layout_of_small_graph() {
        let mut graph = DenseMemoryGraph::new();
        graph.add_edge(7u8, 9u8);
        graph.optimize();

        let bytes = snapshot_of(&graph);
        let mut expected = b"FLATGRPH".to_vec();
        expected.extend([1, FLAG_OPTIMIZED]);
        expected.extend(2u64.to_le_bytes());
        expected.extend([7, 9]);
        expected.extend(1u64.to_le_bytes());
        expected.extend(0i32.to_le_bytes());
        expected.extend(1i32.to_le_bytes());
        assert_eq!(bytes, expected);
    }

    #[test]
    fn roundtrip_unweighted() {
        let rng = &mut Pcg64Mcg::seed_from_u64(11);
        let graph: DenseMemoryGraph<NumNodes> = DenseMemoryGraph::gnp(rng, 50, 0.08);
        assert!(!graph.is_optimized());

        let lazy = DenseMemoryGraph::<NumNodes>::try_read_snapshot(Cursor::new(snapshot_of(
            &graph,
        )))
        .unwrap();
        assert!(!lazy.is_optimized());
        assert_eq!(lazy.labels().collect_vec(), graph.labels().collect_vec());
        assert_eq!(lazy.digest_sha256(), graph.digest_sha256());

        graph.optimize();
        let sorted = DenseMemoryGraph::<NumNodes>::try_read_snapshot(Cursor::new(snapshot_of(
            &graph,
        )))
        .unwrap();
        assert!(sorted.is_optimized());
        assert_eq!(sorted.edges().collect_vec(), graph.edges().collect_vec());
        for u in graph.vertices() {
            assert_eq!(sorted.successors_of(u), graph.successors_of(u));
        }
    }

    #[test]
    fn roundtrip_weighted_with_string_labels() {
        let mut graph = WeightedDenseMemoryGraph::new();
        graph
            .add_weighted_edge("b".to_string(), "a".to_string(), -0.25)
            .unwrap();
        graph
            .add_weighted_edge("a".to_string(), "ä".to_string(), 3.5)
            .unwrap();
        graph.add_edge("a".to_string(), "b".to_string());
        graph.add_node(String::new());

        let copy =
            WeightedDenseMemoryGraph::<String>::try_read_snapshot(Cursor::new(snapshot_of(&graph)))
                .unwrap();

        assert_eq!(copy.labels().collect_vec(), graph.labels().collect_vec());
        assert_eq!(
            copy.weighted_edges().collect_vec(),
            graph.weighted_edges().collect_vec()
        );
        assert_eq!(copy.digest_sha256(), graph.digest_sha256());
        assert_eq!(
            copy.successors(&"a".to_string()).unwrap(),
            graph.successors(&"a".to_string()).unwrap()
        );
    }

    #[test]
    fn roundtrip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.snapshot");

        let graph = small_graph();
        graph.try_write_snapshot_file(&path).unwrap();
        let copy = DenseMemoryGraph::<u32>::try_read_snapshot_file(&path).unwrap();
        assert_eq!(copy.digest_sha256(), graph.digest_sha256());

        let missing = DenseMemoryGraph::<u32>::try_read_snapshot_file(dir.path().join("missing"));
        assert!(matches!(missing, Err(GraphError::Storage(_))));
    }

    #[test]
    fn rejects_foreign_headers() {
        let bytes = snapshot_of(&small_graph());

        let mut wrong_magic = bytes.clone();
        wrong_magic[0] = b'X';
        assert_eq!(
            read_err::<DenseMemoryGraph<u32>>(wrong_magic).kind(),
            ErrorKind::InvalidData
        );

        let mut wrong_version = bytes.clone();
        wrong_version[8] = 2;
        assert_eq!(
            read_err::<DenseMemoryGraph<u32>>(wrong_version).kind(),
            ErrorKind::InvalidData
        );

        let mut unknown_flags = bytes.clone();
        unknown_flags[9] |= 0x80;
        assert_eq!(
            read_err::<DenseMemoryGraph<u32>>(unknown_flags).kind(),
            ErrorKind::InvalidData
        );

        assert_eq!(
            read_err::<WeightedDenseMemoryGraph<u32>>(bytes).kind(),
            ErrorKind::InvalidData
        );
    }

    #[test]
    fn rejects_inconsistent_content() {
        let mut duplicate = b"FLATGRPH".to_vec();
        duplicate.extend([1, 0]);
        duplicate.extend(2u64.to_le_bytes());
        duplicate.extend(5u32.to_le_bytes());
        duplicate.extend(5u32.to_le_bytes());
        duplicate.extend(0u64.to_le_bytes());
        assert_eq!(
            read_err::<DenseMemoryGraph<u32>>(duplicate).kind(),
            ErrorKind::InvalidData
        );

        let header = |flags: u8| {
            let mut bytes = b"FLATGRPH".to_vec();
            bytes.extend([1, flags]);
            bytes.extend(2u64.to_le_bytes());
            bytes.extend(10u32.to_le_bytes());
            bytes.extend(20u32.to_le_bytes());
            bytes.extend(2u64.to_le_bytes());
            bytes
        };

        let mut out_of_range = header(0);
        for id in [0i32, 1, 1, 2] {
            out_of_range.extend(id.to_le_bytes());
        }
        assert_eq!(
            read_err::<DenseMemoryGraph<u32>>(out_of_range).kind(),
            ErrorKind::InvalidData
        );

        let mut unsorted = header(FLAG_OPTIMIZED);
        for id in [1i32, 0, 0, 1] {
            unsorted.extend(id.to_le_bytes());
        }
        assert_eq!(
            read_err::<DenseMemoryGraph<u32>>(unsorted.clone()).kind(),
            ErrorKind::InvalidData
        );

        unsorted[9] = 0;
        let lazy = DenseMemoryGraph::<u32>::try_read_snapshot(Cursor::new(unsorted)).unwrap();
        assert_eq!(lazy.edges().collect_vec(), vec![Edge(0, 1), Edge(1, 0)]);

        let mut weighted = header(FLAG_WEIGHTED);
        for id in [0i32, 1, 1, 0] {
            weighted.extend(id.to_le_bytes());
        }
        weighted.extend(1.0f64.to_bits().to_le_bytes());
        weighted.extend(f64::INFINITY.to_bits().to_le_bytes());
        assert_eq!(
            read_err::<WeightedDenseMemoryGraph<u32>>(weighted).kind(),
            ErrorKind::InvalidData
        );
    }

    #[test]
    fn truncated_snapshots_fail() {
        let bytes = snapshot_of(&small_graph());
        for len in [0, 5, 9, 12, bytes.len() - 1] {
            let err = read_err::<DenseMemoryGraph<u32>>(bytes[..len].to_vec());
            assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
        }
    }
}
