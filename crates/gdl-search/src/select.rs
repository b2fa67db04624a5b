use crate::{rollout::depth_charge, Deadline, SearchError, Tree};
use gdl_core::{JointMove, State, Term};
use gdl_reasoner::Game;
use rand::Rng;

/// Runs depth charges through `mv` at `state` until `deadline` passes,
/// folding each charge's goal vector into that action's running statistics.
fn accumulate_action<R: Rng>(
    tree: &mut Tree,
    game: &Game,
    state: &State,
    mv: &JointMove,
    deadline: Deadline,
    rng: &mut R,
) -> Result<(), SearchError> {
    while !deadline.has_passed() {
        let next = tree.next_state(state, mv, game)?;
        let goals = depth_charge(tree, game, next, deadline, rng)?;
        tree.accumulate(state, mv, &goals);
    }
    Ok(())
}

/// Chooses `role`'s next move at `state` by Monte-Carlo search: splits the
/// time remaining before `deadline` evenly across every candidate joint
/// move, runs depth charges through each, and returns the action belonging
/// to the one with the best observed mean return for `role`.
///
/// If `role` has only one candidate action at `state` (every other role's
/// branching is irrelevant to this choice), it's returned immediately
/// without spending any search budget — the same shortcut a legal-player
/// takes when its own move is forced.
pub fn bestmove<R: Rng>(
    tree: &mut Tree,
    game: &Game,
    state: &State,
    role: &Term,
    deadline: Deadline,
    rng: &mut R,
) -> Result<Term, SearchError> {
    let role_index = game.role_index(role).ok_or(SearchError::NoLegalMoves)?;
    let moves = tree.action_keys(state, game)?;

    let mut own: Vec<&Term> = moves.iter().map(|mv| &mv[role_index]).collect();
    own.sort();
    own.dedup();
    if own.len() == 1 {
        return Ok(own[0].clone());
    }

    let n = moves.len();
    let per_action = deadline.remaining_secs() / n as f64;

    let mut best_move = moves[rng.random_range(0..n)].clone();
    let mut best_utility = 0.0f64;
    for (i, mv) in moves.iter().enumerate() {
        let action_deadline = deadline.minus_secs(per_action * (n - 1 - i) as f64);
        accumulate_action(tree, game, state, mv, action_deadline, rng)?;
        let utility = tree
            .stats(state, mv)
            .map(|s| s.mean(role_index))
            .unwrap_or(0.0);
        if utility > best_utility {
            best_utility = utility;
            best_move = mv.clone();
        }
    }
    Ok(best_move[role_index].clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdl_core::{Clause, Lit, RuleDatabase};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn forced_move_game() -> Game {
        Game::new(RuleDatabase::build(vec![
            Clause::fact(Term::compound("role", vec![Term::atom("robot")])),
            Clause::fact(Term::compound(
                "legal",
                vec![Term::atom("robot"), Term::atom("wait")],
            )),
        ]))
    }

    #[test]
    fn singleton_action_bypasses_search() {
        let game = forced_move_game();
        let mut tree = Tree::new(1);
        let mut rng = SmallRng::seed_from_u64(7);
        // A deadline already in the past: if this fell through to the
        // search loop it would return with zero charges ever taken.
        let deadline = Deadline::after_secs(0.0);
        let mv = bestmove(
            &mut tree,
            &game,
            &State::empty(),
            &Term::atom("robot"),
            deadline,
            &mut rng,
        )
        .unwrap();
        assert_eq!(mv, Term::atom("wait"));
    }

    #[test]
    fn prefers_the_action_leading_to_the_win() {
        let game = Game::new(RuleDatabase::build(vec![
            Clause::fact(Term::compound("role", vec![Term::atom("robot")])),
            Clause::fact(Term::compound(
                "legal",
                vec![Term::atom("robot"), Term::atom("good")],
            )),
            Clause::fact(Term::compound(
                "legal",
                vec![Term::atom("robot"), Term::atom("bad")],
            )),
            Clause::rule(
                Term::compound("next", vec![Term::compound("on", vec![Term::atom("p")])]),
                vec![Lit::Pos(Term::compound(
                    "does",
                    vec![Term::atom("robot"), Term::atom("good")],
                ))],
            ),
            Clause::rule(
                Term::compound("next", vec![Term::compound("on", vec![Term::atom("q")])]),
                vec![Lit::Pos(Term::compound(
                    "does",
                    vec![Term::atom("robot"), Term::atom("bad")],
                ))],
            ),
            Clause::rule(
                Term::atom("terminal"),
                vec![Lit::Or(vec![
                    Lit::Pos(Term::compound(
                        "true",
                        vec![Term::compound("on", vec![Term::atom("p")])],
                    )),
                    Lit::Pos(Term::compound(
                        "true",
                        vec![Term::compound("on", vec![Term::atom("q")])],
                    )),
                ])],
            ),
            Clause::rule(
                Term::compound("goal", vec![Term::atom("robot"), Term::atom("100")]),
                vec![Lit::Pos(Term::compound(
                    "true",
                    vec![Term::compound("on", vec![Term::atom("p")])],
                ))],
            ),
            Clause::rule(
                Term::compound("goal", vec![Term::atom("robot"), Term::atom("0")]),
                vec![Lit::Pos(Term::compound(
                    "true",
                    vec![Term::compound("on", vec![Term::atom("q")])],
                ))],
            ),
        ]));
        let mut tree = Tree::new(1);
        let mut rng = SmallRng::seed_from_u64(42);
        let deadline = Deadline::after_secs(0.3);
        let mv = bestmove(
            &mut tree,
            &game,
            &State::empty(),
            &Term::atom("robot"),
            deadline,
            &mut rng,
        )
        .unwrap();
        assert_eq!(mv, Term::atom("good"));
    }
}
