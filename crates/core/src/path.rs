use std::fmt::Debug;

use common::error::{Error, Result};

/// Rotates a cycle so that it starts and ends at `start`.
///
/// An open path (last vertex differs from the first, or a lone vertex) is
/// closed by repeating its first vertex before rotating. The rotation begins at the first
/// occurrence of `start`, so the edges of the cycle are preserved.
///
/// # Errors
/// Returns `Error::InvalidArgument` if `start` does not occur in `path`.
pub fn start_from<V>(path: &[V], start: &V) -> Result<Vec<V>>
where
    V: Clone + PartialEq + Debug,
{
    let Some(index) = path.iter().position(|v| v == start) else {
        return Err(Error::InvalidArgument(format!(
            "start vertex {:?} does not occur in the path",
            start
        )));
    };

    let mut closed = path.to_vec();
    if closed.len() == 1 || closed.first() != closed.last() {
        closed.push(path[0].clone());
    }

    let body = &closed[..closed.len() - 1];
    let mut rotated = Vec::with_capacity(closed.len());
    rotated.extend_from_slice(&body[index..]);
    rotated.extend_from_slice(&body[..index]);
    rotated.push(start.clone());

    Ok(rotated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotates_closed_cycle() {
        let cycle = ["d", "a", "b", "c", "d"];
        assert_eq!(start_from(&cycle, &"a").unwrap(), vec!["a", "b", "c", "d", "a"]);
        assert_eq!(start_from(&cycle, &"d").unwrap(), vec!["d", "a", "b", "c", "d"]);
        assert_eq!(start_from(&cycle, &"c").unwrap(), vec!["c", "d", "a", "b", "c"]);
    }

    #[test]
    fn closes_open_path_before_rotating() {
        let path = ["a", "b", "c"];
        assert_eq!(start_from(&path, &"a").unwrap(), vec!["a", "b", "c", "a"]);
        assert_eq!(start_from(&path, &"c").unwrap(), vec!["c", "a", "b", "c"]);
    }

    #[test]
    fn self_loop_stays_put() {
        assert_eq!(start_from(&["a", "a"], &"a").unwrap(), vec!["a", "a"]);
    }

    #[test]
    fn lone_vertex_is_closed() {
        assert_eq!(start_from(&["a"], &"a").unwrap(), vec!["a", "a"]);
    }

    #[test]
    fn uses_first_occurrence_of_start() {
        // Non-simple closed walk visiting `b` twice.
        let walk = ["a", "b", "c", "b", "a"];
        assert_eq!(
            start_from(&walk, &"b").unwrap(),
            vec!["b", "c", "b", "a", "b"]
        );
    }

    #[test]
    fn missing_start_is_invalid_argument() {
        let result = start_from(&["a", "b", "a"], &"z");
        assert_eq!(
            result,
            Err(Error::InvalidArgument(
                "start vertex \"z\" does not occur in the path".to_string()
            ))
        );
    }

    #[test]
    fn empty_path_is_invalid_argument() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            start_from(&empty, &"a"),
            Err(Error::InvalidArgument(_))
        ));
    }
}
