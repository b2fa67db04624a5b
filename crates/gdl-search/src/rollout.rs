use crate::{Deadline, SearchError, Tree};
use gdl_core::State;
use gdl_reasoner::Game;
use rand::Rng;

/// Plays uniformly-random joint moves forward from `state` until the game
/// terminates or `deadline` passes, returning the goal vector of wherever
/// play stopped. Non-terminal goal vectors are legitimate — `Tree::goals`
/// is defined on any state, not just terminal ones.
///
/// Iterative, not recursive: a GDL match can run arbitrarily deep and this
/// must not grow the call stack with it.
pub fn depth_charge<R: Rng>(
    tree: &mut Tree,
    game: &Game,
    mut state: State,
    deadline: Deadline,
    rng: &mut R,
) -> Result<Vec<u8>, SearchError> {
    loop {
        if tree.terminal(&state, game)? || deadline.has_passed() {
            return tree.goals(&state, game);
        }
        let moves = tree.action_keys(&state, game)?;
        let mv = &moves[rng.random_range(0..moves.len())];
        state = tree.next_state(&state, mv, game)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdl_core::{Clause, Lit, RuleDatabase, Term};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn buttons_and_lights() -> Game {
        Game::new(RuleDatabase::build(vec![
            Clause::fact(Term::compound("role", vec![Term::atom("robot")])),
            Clause::fact(Term::compound(
                "legal",
                vec![Term::atom("robot"), Term::atom("push")],
            )),
            Clause::rule(
                Term::compound("next", vec![Term::compound("on", vec![Term::atom("p")])]),
                vec![Lit::Pos(Term::compound(
                    "does",
                    vec![Term::atom("robot"), Term::atom("push")],
                ))],
            ),
            Clause::rule(
                Term::atom("terminal"),
                vec![Lit::Pos(Term::compound(
                    "true",
                    vec![Term::compound("on", vec![Term::atom("p")])],
                ))],
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
                vec![Lit::Neg(Term::compound(
                    "true",
                    vec![Term::compound("on", vec![Term::atom("p")])],
                ))],
            ),
        ]))
    }

    #[test]
    fn depth_charge_reaches_terminal_and_scores_win() {
        let game = buttons_and_lights();
        let mut tree = Tree::new(1);
        let mut rng = SmallRng::seed_from_u64(1);
        let deadline = Deadline::after_secs(5.0);
        let goals = depth_charge(&mut tree, &game, State::empty(), deadline, &mut rng).unwrap();
        assert_eq!(goals, vec![100]);
    }
}
