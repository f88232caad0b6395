//! Tests the move generator (chess module)
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////

mod move_gen {
    use gambit::chess::variations;

    mod position_001 {
        use super::count;

        const FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

        #[test]
        fn depth_1() { assert_eq!(count(FEN, 1), 20); }

        #[test]
        fn depth_2() { assert_eq!(count(FEN, 2), 400); }

        #[test]
        fn depth_3() { assert_eq!(count(FEN, 3), 8902); }

        #[test]
        #[ignore]
        fn depth_4() { assert_eq!(count(FEN, 4), 197281); }
    }

    mod position_002 {
        use super::count;

        const FEN: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

        #[test]
        fn depth_1() { assert_eq!(count(FEN, 1), 48); }

        #[test]
        fn depth_2() { assert_eq!(count(FEN, 2), 2039); }

        #[test]
        #[ignore]
        fn depth_3() { assert_eq!(count(FEN, 3), 97862); }
    }

    mod position_003 {
        use super::count;

        const FEN: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";

        #[test]
        fn depth_1() { assert_eq!(count(FEN, 1), 14); }

        #[test]
        fn depth_2() { assert_eq!(count(FEN, 2), 191); }

        #[test]
        fn depth_3() { assert_eq!(count(FEN, 3), 2812); }

        #[test]
        fn depth_4() { assert_eq!(count(FEN, 4), 43238); }
    }

    mod position_004 {
        use super::count;

        const FEN: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";

        #[test]
        fn depth_1() { assert_eq!(count(FEN, 1), 6); }

        #[test]
        fn depth_2() { assert_eq!(count(FEN, 2), 264); }

        #[test]
        fn depth_3() { assert_eq!(count(FEN, 3), 9467); }
    }

    mod position_005 {
        use super::count;

        const FEN: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

        #[test]
        fn depth_1() { assert_eq!(count(FEN, 1), 44); }

        #[test]
        fn depth_2() { assert_eq!(count(FEN, 2), 1486); }
    }

    // castling
    #[test]
    fn position_006() { assert_eq!(count("4k3/8/8/8/8/8/8/4K2R w K - 0 1", 4), 7059); }

    #[test]
    fn position_007() { assert_eq!(count("4k3/8/8/8/8/8/8/R3K3 w Q - 0 1", 4), 7626); }

    #[test]
    fn position_008() { assert_eq!(count("4k2r/8/8/8/8/8/8/4K3 w k - 0 1", 4), 8290); }

    #[test]
    fn position_009() { assert_eq!(count("r3k3/8/8/8/8/8/8/4K3 w q - 0 1", 4), 8897); }

    #[test]
    fn position_010() { assert_eq!(count("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1", 4), 17945); }

    #[test]
    fn position_011() { assert_eq!(count("r3k2r/8/8/8/8/8/8/4K3 w kq - 0 1", 4), 22180); }

    #[test]
    fn position_012() { assert_eq!(count("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", 1), 26); }

    // pawns and promotion
    #[test]
    fn position_013() { assert_eq!(count("8/8/8/8/8/K7/P7/k7 w - - 0 1", 6), 6249); }

    #[test]
    fn position_014() { assert_eq!(count("K7/p7/k7/8/8/8/8/8 w - - 0 1", 6), 2343); }

    #[test]
    fn position_015() { assert_eq!(count("8/2k1p3/3pP3/3P2K1/8/8/8/8 w - - 0 1", 6), 34834); }

    #[test]
    fn position_016() { assert_eq!(count("8/2k1p3/3pP3/3P2K1/8/8/8/8 b - - 0 1", 6), 34822); }

    #[test]
    fn position_017() { assert_eq!(count("8/8/8/8/8/4k3/4P3/4K3 w - - 0 1", 6), 11848); }

    #[test]
    fn position_018() { assert_eq!(count("8/8/7k/7p/7P/7K/8/8 w - - 0 1", 6), 10724); }

    #[test]
    fn position_019() { assert_eq!(count("k7/8/3p4/8/3P4/8/8/7K w - - 0 1", 6), 20960); }

    fn count(fen: &str, depth: usize) -> usize {
        variations::count(&fen.parse().expect("valid fen"), depth)
    }
}
