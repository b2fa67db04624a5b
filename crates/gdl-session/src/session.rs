use crate::GdlError;
use gdl_core::{JointMove, RuleDatabase, State, Term};
use gdl_reasoner::{check_stratified, Game};
use gdl_search::{bestmove, Deadline, Tree};
use rand::Rng;

/// Deadlines are `clock × MARGIN` of the advertised wall-clock budget, never
/// the full budget, to reserve round-trip slack to the game server.
const TIME_MARGIN: f64 = 0.9;

/// Everything built once at START and carried for the life of a match: the
/// rule-derived game descriptor, which role this agent plays, the
/// accumulating search tree, and the playclock to use for each PLAY.
pub struct MatchContext {
    game: Game,
    role: Term,
    tree: Tree,
    initial: State,
    play_clock_secs: f64,
}

impl MatchContext {
    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn role(&self) -> &Term {
        &self.role
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }
}

/// `Idle → Started(match) → Playing(match, state) → Stopped`. One `Session`
/// per matchId; `gdl_session::Registry` maps matchIds to these so
/// concurrent matches never interfere.
pub enum Session {
    Idle,
    Started(MatchContext),
    Playing(MatchContext, State),
    Stopped,
}

impl Default for Session {
    fn default() -> Self {
        Session::Idle
    }
}

impl Session {
    pub fn new() -> Self {
        Session::Idle
    }

    /// Builds the game descriptor, computes `init`, and warms the tree by
    /// running `bestmove` against the start clock so the root is
    /// pre-expanded before the first PLAY arrives.
    pub fn start<R: Rng>(
        &mut self,
        role: Term,
        rules: RuleDatabase,
        start_clock_secs: f64,
        play_clock_secs: f64,
        rng: &mut R,
    ) -> Result<(), GdlError> {
        check_stratified(&rules)
            .map_err(|e| GdlError::InvalidTransition(e.to_string()))?;
        let game = Game::new(rules);
        let initial = game.init()?;
        let mut tree = Tree::new(game.roles().len());
        let deadline = Deadline::after_secs(start_clock_secs * TIME_MARGIN);
        if let Err(e) = bestmove(&mut tree, &game, &initial, &role, deadline, rng) {
            log::warn!("warm-up bestmove failed, proceeding with a cold tree: {}", e);
        }
        *self = Session::Started(MatchContext {
            game,
            role,
            tree,
            initial,
            play_clock_secs,
        });
        Ok(())
    }

    /// Advances the match with the previous round's joint move (`None` on
    /// the very first PLAY) and returns this agent's chosen action.
    pub fn play<R: Rng>(&mut self, mv: Option<JointMove>, rng: &mut R) -> Result<Term, GdlError> {
        let (mut ctx, state, stuck) = match std::mem::replace(self, Session::Stopped) {
            Session::Started(ctx) => {
                let initial = ctx.initial.clone();
                (ctx, initial, false)
            }
            Session::Playing(mut ctx, prev) => match mv {
                None => (ctx, prev, false),
                Some(mv) => match advance(&mut ctx, &prev, &mv) {
                    Ok(next) => (ctx, next, false),
                    Err(e) => {
                        log::warn!("treating state as terminal for safety: {}", e);
                        (ctx, prev, true)
                    }
                },
            },
            other @ (Session::Idle | Session::Stopped) => {
                *self = other;
                return Err(GdlError::InvalidTransition(
                    "PLAY received before START".into(),
                ));
            }
        };

        let action = if stuck {
            fallback_action(&ctx.game, &state, &ctx.role)
        } else {
            let deadline = Deadline::after_secs(ctx.play_clock_secs * TIME_MARGIN);
            bestmove(&mut ctx.tree, &ctx.game, &state, &ctx.role, deadline, rng).or_else(|e| {
                log::warn!("bestmove failed, falling back to any legal action: {}", e);
                fallback_action(&ctx.game, &state, &ctx.role)
            })
        }?;
        *self = Session::Playing(ctx, state);
        Ok(action)
    }

    /// Ends the match (STOP or ABORT both land here); the final tree is
    /// still reachable via `into_tree` for an optional graphviz dump.
    pub fn stop(&mut self) -> Option<Tree> {
        match std::mem::replace(self, Session::Stopped) {
            Session::Started(ctx) | Session::Playing(ctx, _) => Some(ctx.tree),
            Session::Idle | Session::Stopped => None,
        }
    }
}

/// Moves the match forward by one joint move. A move whose arity doesn't
/// match the role count, or whose `next` recomputation otherwise fails, is
/// reported as `StateUnknown` rather than silently truncated or applied —
/// the caller treats the prior state as terminal for safety and responds
/// with any legal action instead of guessing at a successor state.
fn advance(ctx: &mut MatchContext, state: &State, mv: &JointMove) -> Result<State, GdlError> {
    if mv.len() != ctx.game.roles().len() {
        return Err(GdlError::StateUnknown(format!(
            "joint move has {} actions but the match has {} roles",
            mv.len(),
            ctx.game.roles().len()
        )));
    }
    ctx.tree.next_state(state, mv, &ctx.game).map_err(|e| {
        GdlError::StateUnknown(format!("failed to recompute the next state: {}", e))
    })
}

/// Any legal action for `role` at `state`, used when the search itself
/// fails or the successor state couldn't be determined.
fn fallback_action(game: &Game, state: &State, role: &Term) -> Result<Term, GdlError> {
    game.legal(state)?
        .into_iter()
        .find(|(r, _)| r == role)
        .map(|(_, a)| a)
        .ok_or_else(|| GdlError::RuleError(format!("no legal action for role {}", role)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdl_core::Clause;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn buttons_and_lights() -> RuleDatabase {
        RuleDatabase::build(vec![
            Clause::fact(Term::compound("role", vec![Term::atom("robot")])),
            Clause::fact(Term::compound(
                "init",
                vec![Term::compound("off", vec![Term::atom("p")])],
            )),
            Clause::fact(Term::compound(
                "legal",
                vec![Term::atom("robot"), Term::atom("a")],
            )),
            Clause::rule(
                Term::compound("next", vec![Term::compound("on", vec![Term::atom("p")])]),
                vec![gdl_core::Lit::Pos(Term::compound(
                    "does",
                    vec![Term::atom("robot"), Term::atom("a")],
                ))],
            ),
            Clause::rule(
                Term::atom("terminal"),
                vec![gdl_core::Lit::Pos(Term::compound(
                    "true",
                    vec![Term::compound("on", vec![Term::atom("p")])],
                ))],
            ),
            Clause::rule(
                Term::compound("goal", vec![Term::atom("robot"), Term::atom("100")]),
                vec![gdl_core::Lit::Pos(Term::compound(
                    "true",
                    vec![Term::compound("on", vec![Term::atom("p")])],
                ))],
            ),
        ])
    }

    #[test]
    fn start_then_play_nil_returns_legal_action() {
        let mut session = Session::new();
        let mut rng = SmallRng::seed_from_u64(3);
        session
            .start(Term::atom("robot"), buttons_and_lights(), 0.2, 0.2, &mut rng)
            .unwrap();
        let action = session.play(None, &mut rng).unwrap();
        assert_eq!(action, Term::atom("a"));
    }

    #[test]
    fn play_before_start_is_rejected() {
        let mut session = Session::new();
        let mut rng = SmallRng::seed_from_u64(3);
        assert!(session.play(None, &mut rng).is_err());
    }

    #[test]
    fn unstratified_rules_rejected_at_start() {
        let db = RuleDatabase::build(vec![
            Clause::fact(Term::compound("role", vec![Term::atom("robot")])),
            Clause::rule(Term::atom("p"), vec![gdl_core::Lit::Neg(Term::atom("p"))]),
        ]);
        let mut session = Session::new();
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(session
            .start(Term::atom("robot"), db, 0.1, 0.1, &mut rng)
            .is_err());
    }

    #[test]
    fn unknown_move_falls_back_to_a_legal_action_instead_of_erroring() {
        let mut session = Session::new();
        let mut rng = SmallRng::seed_from_u64(3);
        session
            .start(Term::atom("robot"), buttons_and_lights(), 0.2, 0.2, &mut rng)
            .unwrap();
        session.play(None, &mut rng).unwrap();
        // Two roles worth of moves reported for a one-role match: arity
        // mismatch, so `next` can't be trusted and we fall back rather than
        // silently truncating to the first action.
        let bogus = vec![Term::atom("a"), Term::atom("b")];
        let action = session.play(Some(bogus), &mut rng).unwrap();
        assert_eq!(action, Term::atom("a"));
    }

    #[test]
    fn stop_returns_tree_and_resets_to_idle_like_state() {
        let mut session = Session::new();
        let mut rng = SmallRng::seed_from_u64(3);
        session
            .start(Term::atom("robot"), buttons_and_lights(), 0.1, 0.1, &mut rng)
            .unwrap();
        assert!(session.stop().is_some());
        assert!(matches!(session, Session::Stopped));
    }
}
