//! Short sample passages for languages with a default pipeline

const EXAMPLES: [(&str, &str); 5] = [
    (
        "chu",
        "отьчє нашь ижє ѥси на нєбєсѣхъ · да свѧтитъ сѧ имѧ твоѥ · да приидєтъ \
         цѣсарьствиѥ твоѥ · да бѫдєтъ волꙗ твоꙗ · ꙗко на нєбєси и на земли. \
         хлѣбъ нашъ насѫщьнꙑи даждь намъ дьньсь.",
    ),
    (
        "fro",
        "Une aventure vos voil dire, molt bien rimee tot a tire. Por ce l'ai mise \
         en escrit, que l'en ne l'oblit ne ne die. Li rois Artus, li proz, li curteis, \
         a Kardoel esteit sojurnant.",
    ),
    (
        "got",
        "swa liuhtjai liuhaþ izwar in andwairþja manne, ei gasaiƕaina izwara goda \
         waurstwa jah hauhjaina attan izwarana þana in himinam. ni hugjaiþ ei qemjau \
         gatairan witoþ aiþþau praufetuns; ni qam gatairan, ak usfulljan. amen auk \
         qiþa izwis: und þatei usleiþiþ himins jah airþa, jota ains aiþþau ains \
         striks ni usleiþiþ af witoda, unte allata wairþiþ. iþ saei nu gatairiþ aina \
         anabusne þizo minnistono jah laisjai swa mans, minnista haitada in \
         þiudangardjai himine; iþ saei taujiþ jah laisjai swa, sah mikils haitada in \
         þiudangardjai himine.",
    ),
    (
        "grc",
        "ὅτι μὲν ὑμεῖς, ὦ ἄνδρες Ἀθηναῖοι, πεπόνθατε ὑπὸ τῶν ἐμῶν κατηγόρων, οὐκ \
         οἶδα· ἐγὼ δ᾽ οὖν καὶ αὐτὸς ὑπ᾽ αὐτῶν ὀλίγου ἐμαυτοῦ ἐπελαθόμην, οὕτω \
         πιθανῶς ἔλεγον. καίτοι ἀληθές γε ὡς ἔπος εἰπεῖν οὐδὲν εἰρήκασιν.",
    ),
    (
        "lat",
        "Gallia est omnis divisa in partes tres, quarum unam incolunt Belgae, aliam \
         Aquitani, tertiam qui ipsorum lingua Celtae, nostra Galli appellantur. Hi \
         omnes lingua, institutis, legibus inter se differunt. Horum omnium \
         fortissimi sunt Belgae, propterea quod a cultu atque humanitate provinciae \
         longissime absunt, minimeque ad eos mercatores saepe commeant atque ea quae \
         ad effeminandos animos pertinent important, proximique sunt Germanis, qui \
         trans Rhenum incolunt, quibuscum continenter bellum gerunt.",
    ),
];

/// Sample text for a language code, if one is bundled
pub fn example_text(code: &str) -> Option<&'static str> {
    EXAMPLES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, text)| *text)
}

/// Codes with a bundled sample, sorted
pub fn example_languages() -> Vec<&'static str> {
    EXAMPLES.iter().map(|(code, _)| *code).collect()
}
