//! The fixed column contract of the feature dataset.
//!
//! The schema is versioned independently from which columns have real
//! computation behind them: every row carries all columns, zero-filled where
//! a statistic is not (yet) computed, so columns can gain real values one by
//! one without reshaping the output file.

/// Every column of the dataset, in output order. The first column is the
/// document filename; the rest are numeric features.
pub const COLUMNS: [&str; 143] = [
    "Filename", "n_sentences", "n_tokens",
    "tokens_per_sent", "char_per_tok", "ttr_lemma_chunks_100",
    "ttr_lemma_chunks_200", "ttr_form_chunks_100", "ttr_form_chunks_200",
    "upos_dist_ADJ", "upos_dist_ADP", "upos_dist_ADV",
    "upos_dist_AUX", "upos_dist_CCONJ", "upos_dist_DET",
    "upos_dist_INTJ", "upos_dist_NOUN", "upos_dist_NUM",
    "upos_dist_PART", "upos_dist_PRON", "upos_dist_PROPN",
    "upos_dist_PUNCT", "upos_dist_SCONJ", "upos_dist_SYM",
    "upos_dist_VERB", "upos_dist_X", "lexical_density",
    "verbs_tense_dist_Fut", "verbs_tense_dist_Imp", "verbs_tense_dist_Past",
    "verbs_tense_dist_Pres", "verbs_mood_dist_Cnd", "verbs_mood_dist_Imp",
    "verbs_mood_dist_Ind", "verbs_mood_dist_Sub", "verbs_form_dist_Fin",
    "verbs_form_dist_Ger", "verbs_form_dist_Inf", "verbs_form_dist_Part",
    "verbs_num_pers_dist_+3", "verbs_num_pers_dist_Plur+", "verbs_num_pers_dist_Plur+1",
    "verbs_num_pers_dist_Plur+2", "verbs_num_pers_dist_Plur+3", "verbs_num_pers_dist_Sing+1",
    "verbs_num_pers_dist_Sing+2", "verbs_num_pers_dist_Sing+3", "aux_tense_dist_Fut",
    "aux_tense_dist_Imp", "aux_tense_dist_Past", "aux_tense_dist_Pres",
    "aux_mood_dist_Cnd", "aux_mood_dist_Imp", "aux_mood_dist_Ind",
    "aux_mood_dist_Sub", "aux_form_dist_Fin", "aux_form_dist_Ger",
    "aux_form_dist_Inf", "aux_form_dist_Part", "aux_num_pers_dist_Plur+1",
    "aux_num_pers_dist_Plur+2", "aux_num_pers_dist_Plur+3", "aux_num_pers_dist_Sing+1",
    "aux_num_pers_dist_Sing+2", "aux_num_pers_dist_Sing+3", "verbal_head_per_sent",
    "verbal_root_perc", "avg_verb_edges", "verb_edges_dist_0",
    "verb_edges_dist_1", "verb_edges_dist_2", "verb_edges_dist_3",
    "verb_edges_dist_4", "verb_edges_dist_5", "verb_edges_dist_6",
    "avg_max_depth", "avg_token_per_clause", "avg_max_links_len",
    "avg_links_len", "max_links_len", "avg_prepositional_chain_len",
    "n_prepositional_chains", "prep_dist_1", "prep_dist_2",
    "prep_dist_3", "prep_dist_4", "prep_dist_5",
    "obj_pre", "obj_post", "subj_pre",
    "subj_post", "dep_dist_acl", "dep_dist_acl:relcl",
    "dep_dist_advcl", "dep_dist_advmod", "dep_dist_amod",
    "dep_dist_appos", "dep_dist_aux", "dep_dist_aux:pass",
    "dep_dist_case", "dep_dist_cc", "dep_dist_ccomp",
    "dep_dist_compound", "dep_dist_conj", "dep_dist_cop",
    "dep_dist_csubj", "dep_dist_det", "dep_dist_det:poss",
    "dep_dist_det:predet", "dep_dist_discourse", "dep_dist_dislocated",
    "dep_dist_expl", "dep_dist_expl:impers", "dep_dist_expl:pass",
    "dep_dist_fixed", "dep_dist_flat", "dep_dist_flat:foreign",
    "dep_dist_flat:name", "dep_dist_iobj", "dep_dist_mark",
    "dep_dist_nmod", "dep_dist_nsubj", "dep_dist_nsubj:pass",
    "dep_dist_nummod", "dep_dist_obj", "dep_dist_obl",
    "dep_dist_obl:agent", "dep_dist_orphan", "dep_dist_parataxis",
    "dep_dist_punct", "dep_dist_root", "dep_dist_vocative",
    "dep_dist_xcomp", "principal_proposition_dist", "subordinate_proposition_dist",
    "subordinate_post", "subordinate_pre", "avg_subordinate_chain_len",
    "subordinate_dist_1", "subordinate_dist_2", "subordinate_dist_3",
    "subordinate_dist_4", "subordinate_dist_5",
];

/// Number of numeric features per row (everything except `Filename`).
pub const NUM_FEATURES: usize = COLUMNS.len() - 1;

// Offsets into the numeric value vector (i.e. COLUMNS shifted by one) for
// the columns the aggregator actually computes.
pub(crate) const IDX_N_SENTENCES: usize = 0;
pub(crate) const IDX_N_TOKENS: usize = 1;
pub(crate) const IDX_TOKENS_PER_SENT: usize = 2;
pub(crate) const IDX_CHAR_PER_TOK: usize = 3;
pub(crate) const IDX_UPOS_START: usize = 8;
pub(crate) const IDX_LEXICAL_DENSITY: usize = 25;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_comes_first() {
        assert_eq!(COLUMNS[0], "Filename");
        assert_eq!(NUM_FEATURES, 142);
    }

    #[test]
    fn computed_offsets_line_up_with_column_names() {
        assert_eq!(COLUMNS[1 + IDX_N_SENTENCES], "n_sentences");
        assert_eq!(COLUMNS[1 + IDX_N_TOKENS], "n_tokens");
        assert_eq!(COLUMNS[1 + IDX_TOKENS_PER_SENT], "tokens_per_sent");
        assert_eq!(COLUMNS[1 + IDX_CHAR_PER_TOK], "char_per_tok");
        assert_eq!(COLUMNS[1 + IDX_UPOS_START], "upos_dist_ADJ");
        assert_eq!(COLUMNS[1 + IDX_UPOS_START + 16], "upos_dist_X");
        assert_eq!(COLUMNS[1 + IDX_LEXICAL_DENSITY], "lexical_density");
    }

    #[test]
    fn column_names_are_unique() {
        let mut sorted: Vec<_> = COLUMNS.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), COLUMNS.len());
    }
}
