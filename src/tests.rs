#[cfg(test)]
mod unit_tests {
    use crate::context::WinContext;
    use crate::evaluator::{Evaluator, WinResult};
    use crate::parser::parse_tile;
    use crate::riichi_candidates;
    use crate::rules::RuleSet;
    use crate::wall::Wall;

    fn calc(hand: &Evaluator, win: &str, ctx: WinContext) -> WinResult {
        hand.calc(
            parse_tile(win).unwrap(),
            vec![],
            vec![],
            Some(ctx),
            Some(RuleSet::default()),
        )
        .unwrap()
    }

    fn names(r: &WinResult) -> Vec<&str> {
        r.yaku.iter().map(|(n, _)| n.as_str()).collect()
    }

    #[test]
    fn test_closed_kan_hand_completes() {
        // Closed kan of 1m beside three concealed triplets and a pair.
        let hand = Evaluator::from_text("333m555m777m99m(k1m)").unwrap();
        let ctx = WinContext {
            tsumo: true,
            ..WinContext::default()
        };
        let r = calc(&hand, "9m", ctx);
        assert!(r.win);
        // Four concealed triplet-equivalents: the kan counts.
        assert!(names(&r).contains(&"Suuankou"));

        // Declaring a kan flips one more indicator at the table.
        let mut wall = Wall::new(Some(11));
        wall.replacement_draw().unwrap();
        wall.reveal_indicator().unwrap();
        assert_eq!(wall.dora_indicators().len(), 2);
    }

    #[test]
    fn test_pure_double_sequences_in_one_suit() {
        // 234p 234p 567p 567p 88p, self-drawn 8p on the first turn after a
        // double riichi.
        let hand = Evaluator::from_text("22334455667788p").unwrap();
        let ctx = WinContext {
            tsumo: true,
            double_riichi: true,
            ippatsu: true,
            ..WinContext::default()
        };
        let r = calc(&hand, "8p", ctx);
        assert!(r.win);
        let n = names(&r);
        assert!(n.contains(&"Chinitsu"));
        assert!(n.contains(&"Ryanpeikou"));
        assert!(n.contains(&"Menzen Tsumo"));
        assert!(n.contains(&"Double Riichi"));
        assert!(n.contains(&"Ippatsu"));
    }

    #[test]
    fn test_last_draw_excludes_last_discard() {
        // Both flags set by a careless caller; the self-draw side wins.
        let hand = Evaluator::from_text("111m111p111s789m99p").unwrap();
        let ctx = WinContext {
            tsumo: true,
            haitei: true,
            houtei: true,
            ..WinContext::default()
        };
        let r = calc(&hand, "9m", ctx);
        assert!(r.win);
        let n = names(&r);
        assert!(n.contains(&"Haitei"));
        assert!(!n.contains(&"Houtei"));
    }

    #[test]
    fn test_kan_replacement_win_scores_rinshan_not_haitei() {
        // Self-draw off the replacement tile with the live wall also empty:
        // the kan bonus applies and the last-tile bonus does not.
        let hand = Evaluator::from_text("333m555m99m123p(k1s)").unwrap();
        let ctx = WinContext {
            tsumo: true,
            rinshan: true,
            haitei: true,
            ..WinContext::default()
        };
        let r = calc(&hand, "9m", ctx);
        assert!(r.win);
        let n = names(&r);
        assert!(n.contains(&"Rinshan"));
        assert!(!n.contains(&"Haitei"));
    }

    #[test]
    fn test_one_suit_pairs_score_full_flush() {
        // All-pin pairs with no honors: full flush, never half flush.
        let hand = Evaluator::from_text("11223344556677p").unwrap();
        let ctx = WinContext {
            tsumo: true,
            ..WinContext::default()
        };
        let r = calc(&hand, "7p", ctx);
        assert!(r.win);
        let n = names(&r);
        assert!(n.contains(&"Chinitsu"));
        assert!(!n.contains(&"Honitsu"));
        // Consecutive pairs also decompose into two identical runs twice,
        // which outscores the seven-pairs reading.
        assert!(n.contains(&"Ryanpeikou"));
    }

    #[test]
    fn test_seven_pairs_with_honors_scores_half_flush() {
        let hand = Evaluator::from_text("1133557799p1122z").unwrap();
        let ctx = WinContext {
            tsumo: true,
            ..WinContext::default()
        };
        let r = calc(&hand, "1p", ctx);
        assert!(r.win);
        let n = names(&r);
        assert!(n.contains(&"Chiitoitsu"));
        assert!(n.contains(&"Honitsu"));
        assert!(!n.contains(&"Chinitsu"));
        assert_eq!(r.fu, 25);
    }

    #[test]
    fn test_shape_without_yaku_is_not_a_win() {
        // Complete shape, open call, ron, nothing in the catalog applies.
        let hand = Evaluator::from_text("234m567m345p99p(678s)").unwrap();
        let r = hand
            .calc(parse_tile("2m").unwrap(), vec![], vec![], None, None)
            .unwrap();
        assert!(!r.win);
        assert_eq!(r.reason.as_deref(), Some("no_yaku"));
        assert_eq!(r.total, 0);
    }

    #[test]
    fn test_outcomes_are_exclusive() {
        let cases = [
            ("123m456m789m123p11s", "1s"), // win
            ("234m567m234p99s135s", "2m"), // incomplete
        ];
        for (text, win) in cases.iter() {
            let hand = Evaluator::from_text(text).unwrap();
            let r = hand
                .calc(
                    parse_tile(win).unwrap(),
                    vec![],
                    vec![],
                    Some(WinContext {
                        tsumo: true,
                        ..WinContext::default()
                    }),
                    None,
                )
                .unwrap();
            // Exactly one outcome: a win has no reason, a non-win has one.
            assert_eq!(r.win, r.reason.is_none());
        }
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let hand = Evaluator::from_text("22334455667788p").unwrap();
        let ctx = WinContext {
            tsumo: true,
            riichi: true,
            ..WinContext::default()
        };
        let a = calc(&hand, "8p", ctx.clone());
        let b = calc(&hand, "8p", ctx);
        assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
    }

    #[test]
    fn test_riichi_candidates() {
        // 123m 456m 789m 123p 1s + 9s: discarding either extra tile keeps
        // tenpai on the other's tanki, discarding a middle run tile does not.
        let (tiles, _) = crate::parser::parse_hand("123m456m789m123p1s9s").unwrap();
        let candidates = riichi_candidates(tiles.clone());
        let one_sou = parse_tile("1s").unwrap();
        let nine_sou = parse_tile("9s").unwrap();
        assert!(candidates.contains(&one_sou));
        assert!(candidates.contains(&nine_sou));
        assert!(!candidates.contains(&tiles[0])); // 1m is load-bearing
    }

    #[test]
    fn test_small_winds_yakuman() {
        // Three wind triplets plus a wind pair.
        let hand = Evaluator::from_text("111222333z44z123m").unwrap();
        let ctx = WinContext {
            tsumo: true,
            ..WinContext::default()
        };
        let r = calc(&hand, "1m", ctx);
        assert!(r.win);
        assert_eq!(r.yakuman, 1);
        assert!(names(&r).contains(&"Shousuushii"));
    }

    #[test]
    fn test_dragon_triplets_yakuman() {
        let hand = Evaluator::from_text("555666777z123m55s").unwrap();
        let ctx = WinContext {
            tsumo: true,
            ..WinContext::default()
        };
        let r = hand
            .calc(
                parse_tile("5s").unwrap(),
                vec![parse_tile("4s").unwrap()],
                vec![],
                Some(ctx),
                Some(RuleSet::default()),
            )
            .unwrap();
        assert!(r.win);
        assert_eq!(r.yakuman, 1);
        assert_eq!(names(&r), vec!["Daisangen"]);
        assert!(!names(&r).contains(&"Dora"));
        assert_eq!(r.limit.as_deref(), Some("Yakuman"));
    }
}
