//! Co-sorting teams by rank

/// Stably reorder `teams` and `ranks` together so ranks are non-decreasing.
/// Teams with equal rank keep their relative order.
pub fn sort_by_rank<T: Clone>(teams: &[T], ranks: &[u32]) -> (Vec<T>, Vec<u32>) {
    if ranks.windows(2).all(|pair| pair[0] <= pair[1]) {
        return (teams.to_vec(), ranks.to_vec());
    }

    let mut order: Vec<usize> = (0..ranks.len()).collect();
    order.sort_by_key(|&index| ranks[index]);

    let sorted_teams = order.iter().map(|&index| teams[index].clone()).collect();
    let sorted_ranks = order.iter().map(|&index| ranks[index]).collect();
    (sorted_teams, sorted_ranks)
}
