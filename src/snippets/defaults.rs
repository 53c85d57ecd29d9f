// Built-in template set used when nothing valid is persisted

use super::Template;

const SOAP_BODY: &str = concat!(
    "# SUBJETIVO\n",
    "ID: ${1:M/F, idade}\n",
    "QPD: ${2:Relata que há...}\n",
    "HDA: ${3:Início há x dias, evoluindo com...}\n",
    "ISDA: ${4:Nega queixas álgicas, urinárias ou gastrointestinais.}\n",
    "\n",
    "ANT. PESSOAIS:\n",
    "- Comorbidades: ${5:Nega HAS/DM/DLP.}\n",
    "- Cirurgias/Internações: ${6:Nega prévias.}\n",
    "- Meds em uso: ${7:Nega uso contínuo.}\n",
    "- Alergias: ${8:Nega conhecidas.}\n",
    "\n",
    "HÁBITOS:\n",
    "- Tabagismo: ${9:Nega.}\n",
    "- Etilismo: ${10:Social/Esporádico.}\n",
    "- Ativ. Física: ${11:Sedentário(a).}\n",
    "\n",
    "# OBJETIVO\n",
    "Geral: BEG, LOTE, Corado, Hidratado, Anictérico, Afebril.\n",
    "Sinais: PA: ${12:120x80} mmHg | FC: ${13:72} bpm | FR: ${14:16} irpm | SatO2: ${15:98}% | Tax: ${16:36,5}ºC\n",
    "Antropometria: Peso: ${17:__}kg | Alt: ${18:__}m | IMC: ${19:__}\n",
    "\n",
    "EXAME FÍSICO:\n",
    "> AR: ${20:MV+ em AHT, s/ RA. Eupneico em AA.}\n",
    "> ACV: ${21:RCR 2T, BNF, s/ sopros. Ictus não visível.}\n",
    "> ABD: ${22:Plano, flácido, indolor à palpação, RHA+, s/ VMG ou massas.}\n",
    "> EXT: ${23:Bem perfundidos, s/ edema ou empastamento. Pulsos presentes e simétricos.}\n",
    "> ORO/OTUS: ${24:Oroscopia s/ hiperemia ou placas. Otoscopia s/ alterações.}\n",
    "\n",
    "# AVALIAÇÃO\n",
    "1. HD: ${25:___} (CID: ${26:___})\n",
    "2. HD: ${27:___}\n",
    "\n",
    "# PLANO TERAPÊUTICO\n",
    "1. Não-Farmacológico: ${28:Mudança estilo de vida, hidratação, dieta.}\n",
    "2. Farmacológico:\n",
    "   - ${29:Segue prescrição padrão.}\n",
    "3. Exames: ${30:Nenhum no momento.}\n",
    "4. Seguimento: Retorno em ${31:x dias/meses} ou s.o.s.",
);

const EXAM_NORMAL_BODY: &str = concat!(
    "BEG, LOTE, Corado, Hidratado, Anictérico, Acianótico.\n",
    "AR: MV+ s/ RA.\n",
    "ACV: RCR 2T BNF s/ sopros.\n",
    "ABD: Flácido, indolor, RHA+.",
);

/// The fixed default collection: a full SOAP note and a normal physical exam
pub fn default_templates() -> Vec<Template> {
    vec![
        Template::new("SOAP Padrão", "soap", SOAP_BODY),
        Template::new("Exame Normal", "efn", EXAM_NORMAL_BODY),
    ]
}
